//! Sample data returned when an upstream credential is not configured

use agrione_domain::{Commodity, CropHealthReport};

pub fn sample_crop_report() -> CropHealthReport {
    CropHealthReport {
        plant_info: "This appears to be a tomato plant (Solanum lycopersicum), a popular \
                     vegetable crop. It is in its early fruiting stage. Tomato plants require \
                     ample sunlight, regular watering, and nutrient-rich soil to thrive."
            .to_string(),
        disease_diagnosis: "The yellowing leaves with dark spots are indicative of Early Blight \
                            (Alternaria solani), a common fungal disease in tomatoes. This is \
                            often exacerbated by humid weather and overhead watering."
            .to_string(),
        solution: "1. **Pruning:** Immediately remove and destroy the infected lower leaves to \
                   prevent the spread of spores.\n\
                   2. **Watering:** Water at the base of the plant in the morning to avoid wet \
                   foliage overnight.\n\
                   3. **Fungicide:** Apply a copper-based or bio-fungicide (like Bacillus \
                   subtilis) spray, ensuring complete coverage of the plant. Repeat every 7-10 \
                   days.\n\
                   4. **Mulching:** Add a layer of straw or mulch around the plant base to \
                   prevent fungus from splashing up from the soil."
            .to_string(),
    }
}

pub fn sample_commodities() -> Vec<Commodity> {
    vec![
        Commodity::new("Soya Bean", 4500.0, 4650.0, 4600.0, "Quintal"),
        Commodity::new("Paddy(Dhan)(Common)", 2100.0, 2200.0, 2183.0, "Quintal"),
        Commodity::new("Maize", 2000.0, 2100.0, 2050.0, "Quintal"),
        Commodity::new("Wheat", 2200.0, 2300.0, 2250.0, "Quintal"),
    ]
}

pub fn sample_pest_alerts(crop_type: &str) -> Vec<String> {
    vec![
        format!(
            "Warm, humid nights expected this week raise the risk of fungal leaf spot on {crop_type}. \
             Inspect lower leaves and avoid overhead irrigation."
        ),
        format!(
            "Aphid and whitefly activity typically rises after light rain; check the undersides of \
             {crop_type} leaves and use yellow sticky traps."
        ),
    ]
}
