//! Weather data and pest/disease alerts

use std::sync::Arc;

use agrione_common::{execute_with_fallback, Fallback, FallbackMode, Precondition, RetryExecutor};
use agrione_domain::{PestAlerts, Result, WeatherAlerts, WeatherAlertsRequest, WeatherData};
use tracing::{info, instrument};

use super::{parse_structured, surface};
use crate::fallbacks::sample_pest_alerts;
use crate::ports::{GenerativeModel, WeatherProvider};
use crate::prompts;

/// Combines current weather with model-generated pest alerts.
pub struct WeatherAlertService {
    model: Arc<dyn GenerativeModel>,
    weather: Arc<dyn WeatherProvider>,
    executor: RetryExecutor,
}

impl WeatherAlertService {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        weather: Arc<dyn WeatherProvider>,
        executor: RetryExecutor,
    ) -> Self {
        Self { model, weather, executor }
    }

    /// Fetch weather and pest alerts concurrently; either failing fails the
    /// whole request.
    #[instrument(skip_all, fields(location = %request.location, crop_type = %request.crop_type))]
    pub async fn alerts(&self, request: &WeatherAlertsRequest) -> Result<WeatherAlerts> {
        let (location, crop_type) = request.validate()?;

        let (weather, alerts) =
            tokio::try_join!(self.weather_data(location), self.pest_alerts(location, crop_type))?;

        Ok(WeatherAlerts {
            alerts,
            weather,
            location: location.to_string(),
            crop_type: crop_type.to_string(),
        })
    }

    /// Current conditions. A missing credential or a permanent upstream
    /// failure yields "N/A" fields; an unavailable upstream is an error.
    pub async fn weather_data(&self, location: &str) -> Result<WeatherData> {
        let weather = self.weather.as_ref();
        let resolved = execute_with_fallback(
            Precondition::require(
                weather.is_configured(),
                "VISUAL_CROSSING_API_KEY is not set, weather data unavailable",
            ),
            move || weather.current_weather(location),
            Fallback::lazy(WeatherData::unavailable),
            FallbackMode::SurfaceUnavailable,
            &self.executor,
        )
        .await
        .map_err(surface)?;

        if resolved.is_fallback() {
            info!(source = ?resolved.source, "Using placeholder weather data");
        }
        Ok(resolved.value)
    }

    /// Predictive pest and disease alerts for a crop at a location.
    pub async fn pest_alerts(&self, location: &str, crop_type: &str) -> Result<Vec<String>> {
        let prompt = prompts::pest_alerts(location, crop_type);
        let model = self.model.as_ref();
        let prompt = &prompt;
        let sample_crop = crop_type.to_string();

        let resolved = execute_with_fallback(
            Precondition::require(
                model.is_configured(),
                "GEMINI_API_KEY is not set, returning sample pest alerts",
            ),
            move || async move {
                let value = model.generate_json(prompt).await?;
                let alerts: PestAlerts = parse_structured(value)?;
                Ok(alerts.alerts)
            },
            Fallback::lazy(move || sample_pest_alerts(&sample_crop)),
            FallbackMode::SurfaceAll,
            &self.executor,
        )
        .await
        .map_err(surface)?;

        Ok(resolved.value)
    }
}
