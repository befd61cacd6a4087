//! Application context - dependency injection container

use agrione_core::DashboardActions;
use agrione_domain::{Config, ProviderMode, Result};
use agrione_infra::ProviderSet;

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds the configuration and every dashboard action
pub struct AppContext {
    pub config: Config,
    pub providers: ProviderSet,
    pub actions: DashboardActions,
}

impl AppContext {
    /// Build the context from a loaded configuration.
    ///
    /// # Errors
    /// Returns `AgriError::Config` when the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let providers = ProviderSet::from_config(&config)?;
        let actions = providers.actions(&config)?;

        tracing::info!(mode = %providers.mode, "Application context initialized");
        Ok(Self { config, providers, actions })
    }

    pub fn mode(&self) -> ProviderMode {
        self.providers.mode
    }

    /// Report which upstream credentials are in place.
    ///
    /// A missing credential does not stop the server: the affected features
    /// serve fallback data, so the component is reported unhealthy with a
    /// message instead.
    pub fn health_check(&self) -> HealthStatus {
        let providers = &self.providers.providers;
        let mut status = HealthStatus::new();

        for (name, configured) in [
            ("gemini", providers.model.is_configured()),
            ("speech", providers.speech.is_configured()),
            ("weather", providers.weather.is_configured()),
            ("market", providers.market.is_configured()),
        ] {
            let component = if configured {
                ComponentHealth::healthy(name)
            } else {
                ComponentHealth::unhealthy(name, "API key not set; serving fallback data")
            };
            status = status.add_component(component);
        }

        status.calculate_score();
        status
    }
}

#[cfg(test)]
mod tests {
    use agrione_domain::ApiKey;

    use super::*;

    #[test]
    fn test_mock_context_is_fully_healthy() {
        let mut config = Config::default();
        config.providers.mode = ProviderMode::Mock;

        let context = AppContext::new(config).unwrap();
        let status = context.health_check();

        assert_eq!(context.mode(), ProviderMode::Mock);
        assert!(status.is_healthy);
        assert_eq!(status.components.len(), 4);
    }

    #[test]
    fn test_missing_keys_degrade_health() {
        let mut config = Config::default();
        config.gemini.api_key = ApiKey::new("AIza-test");

        let status = AppContext::new(config).unwrap().health_check();

        assert!(!status.is_healthy);
        assert!((status.score - 0.5).abs() < f64::EPSILON);
        let weather = status.components.iter().find(|c| c.name == "weather").unwrap();
        assert_eq!(weather.message.as_deref(), Some("API key not set; serving fallback data"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.retry.max_attempts = 0;

        assert!(AppContext::new(config).is_err());
    }
}
