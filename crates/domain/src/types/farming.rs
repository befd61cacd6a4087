//! Personalized farming plans

use serde::{Deserialize, Serialize};

use super::required;
use crate::constants::PLAN_SUMMARY_MAX_CHARS;
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmingPlanRequest {
    #[serde(default)]
    pub farm_details: String,
    #[serde(default)]
    pub crop_type: String,
    #[serde(default)]
    pub current_practices: String,
}

impl FarmingPlanRequest {
    /// Fields are checked in form order; the first missing one is reported.
    pub fn validate(&self) -> Result<()> {
        required(&self.farm_details, "Farm details are required.")?;
        required(&self.crop_type, "Crop type is required.")?;
        required(&self.current_practices, "Current practices are required.")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmingPlan {
    pub irrigation_recommendations: String,
    pub fertilization_recommendations: String,
    pub pest_control_recommendations: String,
    pub expected_yield_increase: String,
    pub resource_waste_reduction: String,
}

impl FarmingPlan {
    /// The three recommendation sections; the estimates are not translated.
    pub fn recommendations(&self) -> [&str; 3] {
        [
            &self.irrigation_recommendations,
            &self.fertilization_recommendations,
            &self.pest_control_recommendations,
        ]
    }

    pub fn with_recommendations(self, [irrigation, fertilization, pest_control]: [String; 3]) -> Self {
        Self {
            irrigation_recommendations: irrigation,
            fertilization_recommendations: fertilization,
            pest_control_recommendations: pest_control,
            ..self
        }
    }

    /// Short plan overview used by the assistant.
    pub fn summary(&self) -> String {
        format!(
            "Based on your details, here is a summary of your farming plan:\n\
             - **Irrigation**: {}...\n\
             - **Fertilization**: {}...\n\
             - **Pest Control**: {}...\n\
             This plan could increase your yield by {} and reduce waste by {}.",
            truncate_chars(&self.irrigation_recommendations, PLAN_SUMMARY_MAX_CHARS),
            truncate_chars(&self.fertilization_recommendations, PLAN_SUMMARY_MAX_CHARS),
            truncate_chars(&self.pest_control_recommendations, PLAN_SUMMARY_MAX_CHARS),
            self.expected_yield_increase,
            self.resource_waste_reduction,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatePlanRequest {
    pub plan: FarmingPlan,
    pub language_code: String,
}

/// First `max` characters of `text`, never splitting a code point.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
