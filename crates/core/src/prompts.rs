//! Prompt templates and response schemas for the model-backed flows

use agrione_domain::{InlineImage, Language};
use serde_json::{json, Value};

use crate::ports::{StructuredPrompt, ToolDeclaration};

pub const GET_WEATHER_DATA: &str = "getWeatherData";
pub const GET_MARKET_PRICES: &str = "getMarketPrices";
pub const GET_FARMING_PLAN: &str = "getFarmingPlan";

/// Object schema whose properties are all required strings.
fn string_object(fields: &[(&str, &str)]) -> Value {
    let properties: serde_json::Map<String, Value> = fields
        .iter()
        .map(|(name, description)| {
            ((*name).to_string(), json!({ "type": "STRING", "description": description }))
        })
        .collect();
    let required: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    json!({ "type": "OBJECT", "properties": properties, "required": required })
}

pub fn crop_health_report(description: &str, image: InlineImage) -> StructuredPrompt {
    let prompt = format!(
        "You are an expert agriculture advisor. Analyze the provided image and description to \
         generate a crop health report. The report must be in three distinct parts:\n\n\
         1. plantInfo: Provide a small description and general knowledge about the plant shown \
         in the photo.\n\
         2. diseaseDiagnosis: Identify and provide information about the specific disease or \
         pest affecting the plant.\n\
         3. solution: Give a complete, actionable solution and the recommended course of action \
         to treat the issue.\n\n\
         Description: {description}"
    );
    let schema = string_object(&[
        ("plantInfo", "A small description and knowledge about the identified plant."),
        ("diseaseDiagnosis", "Information and diagnosis of the disease or pest affecting the plant."),
        ("solution", "A complete solution and recommended course of action."),
    ]);
    StructuredPrompt::new(prompt, schema).with_image(image)
}

pub fn translation(text: &str, language: Language) -> StructuredPrompt {
    let prompt = format!(
        "Translate the following text to {}. Respond with only the translated text, without any \
         introductory phrases or explanations.\n\nText to translate:\n\"{text}\"",
        language.name()
    );
    StructuredPrompt::new(prompt, string_object(&[("translatedText", "The translated text.")]))
}

pub fn pest_alerts(location: &str, crop_type: &str) -> StructuredPrompt {
    let prompt = format!(
        "You are an expert agricultural advisor. Provide predictive alerts about potential pest \
         and disease outbreaks for a given location and crop type, based on hyperlocal weather \
         data and climate change projections.\n\n\
         Location: {location}\nCrop Type: {crop_type}\n\nAlerts:"
    );
    let schema = json!({
        "type": "OBJECT",
        "properties": {
            "alerts": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of predictive pest and disease alerts."
            }
        },
        "required": ["alerts"]
    });
    StructuredPrompt::new(prompt, schema)
}

pub fn farming_plan(farm_details: &str, crop_type: &str, current_practices: &str) -> StructuredPrompt {
    let prompt = format!(
        "You are an expert agricultural advisor. Based on the provided farm details, crop type, \
         and current practices, provide personalized recommendations for optimizing irrigation, \
         fertilization, and pest control to maximize crop yield and reduce resource waste.\n\n\
         Farm Details: {farm_details}\nCrop Type: {crop_type}\n\
         Current Practices: {current_practices}\n\n\
         Consider factors like soil type, climate, and common pests/diseases for the specified \
         crop type. Also estimate the expected yield increase and resource waste reduction."
    );
    let schema = string_object(&[
        ("irrigationRecommendations", "Personalized recommendations for optimizing irrigation practices."),
        ("fertilizationRecommendations", "Personalized recommendations for optimizing fertilization practices."),
        ("pestControlRecommendations", "Personalized recommendations for optimizing pest control practices."),
        ("expectedYieldIncrease", "The estimated percentage increase in crop yield."),
        ("resourceWasteReduction", "The estimated percentage reduction in resource waste."),
    ]);
    StructuredPrompt::new(prompt, schema)
}

pub fn assistant(query: &str) -> String {
    format!(
        "You are an expert farming assistant named AgriOne AI. Your role is to provide helpful \
         and accurate information about farming.\n\n\
         Detect the language of the user's query and respond in the same language.\n\n\
         You have access to a set of tools to answer specific questions:\n\
         - Use '{GET_WEATHER_DATA}' for real-time weather inquiries.\n\
         - Use '{GET_MARKET_PRICES}' for questions about commodity prices in specific markets.\n\
         - Use '{GET_FARMING_PLAN}' when a user asks for farming advice, a plan, or \
         recommendations, but only if they provide their farm details, crop type, and current \
         practices. Otherwise, ask for the missing information.\n\
         - For questions about government schemes, provide a general overview based on your \
         knowledge.\n\n\
         User query: {query}\n\n\
         Provide a helpful and concise response. If your response is a list or has multiple \
         steps, format each point with an HTML line break tag (<br />) to ensure proper spacing."
    )
}

/// Functions the assistant may call.
pub fn assistant_tools() -> Vec<ToolDeclaration> {
    vec![
        ToolDeclaration {
            name: GET_WEATHER_DATA.to_string(),
            description: "Get the current weather for a given location.".to_string(),
            parameters: string_object(&[(
                "location",
                "The city and state, e.g. San Francisco, CA",
            )]),
        },
        ToolDeclaration {
            name: GET_MARKET_PRICES.to_string(),
            description: "Get the latest commodity prices for a specific agricultural market."
                .to_string(),
            parameters: string_object(&[(
                "market",
                "The market to get commodity prices for (e.g., MP_Bhopal).",
            )]),
        },
        ToolDeclaration {
            name: GET_FARMING_PLAN.to_string(),
            description: "Generates a personalized farming plan with recommendations for \
                          irrigation, fertilization, and pest control."
                .to_string(),
            parameters: string_object(&[
                (
                    "farmDetails",
                    "Detailed information about the farm, including size, location, and soil type.",
                ),
                ("cropType", "The type of crop being cultivated."),
                (
                    "currentPractices",
                    "Description of the current farming practices, including irrigation, \
                     fertilization, and pest control methods.",
                ),
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_object_requires_every_field() {
        let schema = string_object(&[("a", "first"), ("b", "second")]);
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["b"]["type"], "STRING");
        assert_eq!(schema["required"], json!(["a", "b"]));
    }

    #[test]
    fn test_assistant_prompt_names_every_tool() {
        let prompt = assistant("Mandi rates?");
        let tools = assistant_tools();
        assert_eq!(tools.len(), 3);
        for tool in &tools {
            assert!(prompt.contains(&format!("'{}'", tool.name)));
        }
        assert_eq!(tools[2].parameters["required"], json!(["farmDetails", "cropType", "currentPractices"]));
        assert!(prompt.ends_with("to ensure proper spacing."));
    }

    #[test]
    fn test_translation_prompt_names_language() {
        let prompt = translation("Water daily", Language::Tamil);
        assert!(prompt.prompt.contains("to Tamil."));
        assert!(prompt.prompt.contains("\"Water daily\""));
        assert!(prompt.image.is_none());
    }

    #[test]
    fn test_crop_prompt_carries_image() {
        let image = InlineImage { mime_type: "image/png".into(), data: "AAAA".into() };
        let prompt = crop_health_report("yellow leaves", image.clone());
        assert_eq!(prompt.image, Some(image));
        assert!(prompt.prompt.ends_with("Description: yellow leaves"));
    }
}
