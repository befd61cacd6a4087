//! Domain types and models
//!
//! One module per dashboard feature. Field names serialize in camelCase to
//! match the JSON the dashboard exchanges; market prices keep the upstream's
//! snake_case.

pub mod chat;
pub mod crop_health;
pub mod farming;
pub mod language;
pub mod market;
pub mod speech;
pub mod weather;

pub use chat::{ChatRequest, ChatResponse};
pub use crop_health::{CropHealthReport, CropHealthRequest, InlineImage, TranslateReportRequest};
pub use farming::{FarmingPlan, FarmingPlanRequest, TranslatePlanRequest};
pub use language::{Language, TranslationRequest, TranslationTarget};
pub use market::{Commodity, CommodityPrices, MarketPriceRequest};
pub use speech::{AudioClip, SpeechRequest};
pub use weather::{
    PestAlerts, TranslateAlertsRequest, WeatherAlerts, WeatherAlertsRequest, WeatherData,
};

use crate::errors::{AgriError, Result};

/// Trimmed value of a required text field, or `InvalidInput(message)`.
pub(crate) fn required<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AgriError::invalid_input(message))
    } else {
        Ok(trimmed)
    }
}
