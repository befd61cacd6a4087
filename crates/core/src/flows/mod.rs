//! Feature flows
//!
//! Each flow validates its input, builds a prompt or provider request and
//! runs it through the resilience executor. Flows return domain results;
//! mapping to user-facing messages happens in [`crate::actions`].

pub mod chat;
pub mod crop_health;
pub mod farming;
pub mod market;
pub mod speech;
pub mod translation;
pub mod weather;

pub use chat::{AssistantService, AssistantTools};
pub use crop_health::CropHealthService;
pub use farming::FarmingPlanService;
pub use market::MarketPriceService;
pub use speech::SpeechService;
pub use translation::TranslationService;
pub use weather::WeatherAlertService;

use agrione_common::{RetryError, RetryPolicy};
use agrione_domain::{AgriError, Result, RetrySettings};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Build the shared retry policy from configuration.
pub fn retry_policy(settings: &RetrySettings) -> Result<RetryPolicy> {
    let builder = RetryPolicy::builder()
        .max_attempts(settings.max_attempts)
        .linear_backoff(settings.base_delay());
    let builder = match settings.attempt_timeout() {
        Some(deadline) => builder.attempt_timeout(deadline),
        None => builder.no_attempt_timeout(),
    };
    builder.build().map_err(|e| AgriError::Config(e.to_string()))
}

/// Collapse an executor error into the domain error callers see.
pub(crate) fn surface(err: RetryError<AgriError>) -> AgriError {
    match err {
        RetryError::Unavailable { .. } | RetryError::AttemptTimedOut { .. } => {
            AgriError::ServiceUnavailable
        }
        RetryError::Permanent { error } => error,
        RetryError::InvalidPolicy { message } => AgriError::Config(message),
    }
}

/// Validate a model's JSON answer against the expected shape.
pub(crate) fn parse_structured<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        AgriError::invalid_response(format!("model output did not match the schema: {e}"))
    })
}
