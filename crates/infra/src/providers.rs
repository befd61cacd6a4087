//! Provider wiring from configuration

use std::sync::Arc;

use agrione_common::RetryExecutor;
use agrione_core::{retry_policy, DashboardActions, Providers};
use agrione_domain::{Config, ProviderMode, Result};
use tracing::{info, warn};

use crate::http::HttpClient;
use crate::integrations::{FasalClient, GeminiClient, VisualCrossingClient};
use crate::mock::{MockMarket, MockModel, MockSpeech, MockWeather};

/// The providers selected by `providers.mode`, ready to hand to the flows.
#[derive(Debug, Clone)]
pub struct ProviderSet {
    pub mode: ProviderMode,
    pub providers: Providers,
}

impl ProviderSet {
    pub fn from_config(config: &Config) -> Result<Self> {
        let providers = match config.providers.mode {
            ProviderMode::Live => live_providers(config)?,
            ProviderMode::Mock => mock_providers(),
        };
        info!(mode = %config.providers.mode, providers = ?providers, "Providers ready");
        Ok(Self { mode: config.providers.mode, providers })
    }

    /// Every dashboard action over these providers, sharing one retry
    /// policy.
    pub fn actions(&self, config: &Config) -> Result<DashboardActions> {
        let executor = RetryExecutor::new(retry_policy(&config.retry)?);
        Ok(DashboardActions::new(&self.providers, executor))
    }
}

fn live_providers(config: &Config) -> Result<Providers> {
    let http_client = HttpClient::from_config(&config.http)?;
    let gemini = Arc::new(GeminiClient::new(&config.gemini, http_client.clone()));

    for (name, configured) in [
        ("GEMINI_API_KEY", config.gemini.api_key.is_configured()),
        ("VISUAL_CROSSING_API_KEY", config.weather.api_key.is_configured()),
        ("FASAL_API_KEY", config.market.api_key.is_configured()),
    ] {
        if !configured {
            warn!("{name} is not set; the affected features will use fallback data");
        }
    }

    Ok(Providers {
        model: gemini.clone(),
        speech: gemini,
        weather: Arc::new(VisualCrossingClient::new(&config.weather, http_client.clone())),
        market: Arc::new(FasalClient::new(&config.market, http_client)),
    })
}

fn mock_providers() -> Providers {
    Providers {
        model: Arc::new(MockModel),
        speech: Arc::new(MockSpeech),
        weather: Arc::new(MockWeather),
        market: Arc::new(MockMarket),
    }
}
