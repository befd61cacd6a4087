//! Application configuration
//!
//! Loaded once at start-up by `agrione_infra::config` and handed down by
//! reference. Nothing below the entry point reads the environment.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    API_KEY_PLACEHOLDERS, DEFAULT_ATTEMPT_TIMEOUT_MS, DEFAULT_BASE_DELAY_MS, DEFAULT_BIND_ADDR,
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_TTS_MODEL,
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LOG_LEVEL, DEFAULT_MARKET_BASE_URL, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_USER_AGENT, DEFAULT_WEATHER_BASE_URL, MAX_RETRY_ATTEMPTS,
};
use crate::errors::{AgriError, Result};

/// Secret credential for an upstream API.
///
/// `Debug` never prints the key.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// False for empty keys and the placeholders shipped in sample files.
    pub fn is_configured(&self) -> bool {
        let key = self.0.trim();
        !key.is_empty() && !API_KEY_PLACEHOLDERS.iter().any(|p| p.eq_ignore_ascii_case(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_configured() {
            f.write_str("ApiKey(<redacted>)")
        } else {
            f.write_str("ApiKey(<unset>)")
        }
    }
}

/// Whether upstream providers are real clients or deterministic mocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    #[default]
    Live,
    Mock,
}

impl_code_conversions!(ProviderMode {
    Live => "live",
    Mock => "mock",
});

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl_code_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: ApiKey,
    pub model: String,
    pub tts_model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            tts_model: DEFAULT_GEMINI_TTS_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: ApiKey,
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self { api_key: ApiKey::default(), base_url: DEFAULT_WEATHER_BASE_URL.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub api_key: ApiKey,
    pub base_url: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self { api_key: ApiKey::default(), base_url: DEFAULT_MARKET_BASE_URL.to_string() }
    }
}

/// Retry settings shared by every orchestrated call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    /// 0 disables the per-attempt deadline.
    pub attempt_timeout_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            attempt_timeout_ms: DEFAULT_ATTEMPT_TIMEOUT_MS,
        }
    }
}

impl RetrySettings {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        (self.attempt_timeout_ms > 0).then(|| Duration::from_millis(self.attempt_timeout_ms))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: DEFAULT_BIND_ADDR.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), format: LogFormat::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub mode: ProviderMode,
}

/// Configuration for the application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub weather: WeatherConfig,
    pub market: MarketConfig,
    pub retry: RetrySettings,
    pub http: HttpConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub providers: ProvidersConfig,
}

impl Config {
    /// Reject values no component can work with.
    ///
    /// Missing API keys are not errors: they select the fallback path of
    /// the affected feature.
    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(AgriError::Config("retry.max_attempts must be at least 1".into()));
        }
        if self.retry.max_attempts > MAX_RETRY_ATTEMPTS {
            return Err(AgriError::Config(format!(
                "retry.max_attempts must be at most {MAX_RETRY_ATTEMPTS}"
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(AgriError::Config("http.timeout_secs must be greater than 0".into()));
        }
        for (name, url) in [
            ("gemini.base_url", &self.gemini.base_url),
            ("weather.base_url", &self.weather.base_url),
            ("market.base_url", &self.market.base_url),
        ] {
            if url.trim().is_empty() {
                return Err(AgriError::Config(format!("{name} must not be empty")));
            }
        }
        self.bind_addr()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind_addr.parse().map_err(|e| {
            AgriError::Config(format!("invalid server.bind_addr '{}': {e}", self.server.bind_addr))
        })
    }
}
