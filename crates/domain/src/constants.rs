//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application.

// Upstream defaults
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_WEATHER_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";
pub const DEFAULT_MARKET_BASE_URL: &str = "https://api.fasal.co/v1";

// Retry defaults
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Upper bound on `retry.max_attempts`.
pub const MAX_RETRY_ATTEMPTS: u32 = 10;
pub const DEFAULT_BASE_DELAY_MS: u64 = 500;
pub const DEFAULT_ATTEMPT_TIMEOUT_MS: u64 = 30_000;

// HTTP / server defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("agrione/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Values shipped in sample env files that mean "no key configured".
pub const API_KEY_PLACEHOLDERS: &[&str] = &[
    "<YOUR_API_KEY>",
    "YOUR_API_KEY",
    "YOUR_GEMINI_API_KEY",
    "YOUR_VISUAL_CROSSING_API_KEY",
    "YOUR_FASAL_API_KEY",
];

// Speech
pub const DEFAULT_VOICE: &str = "Algenib";
pub const TTS_SAMPLE_RATE: u32 = 24_000;
pub const TTS_CHANNELS: u16 = 1;
pub const TTS_BITS_PER_SAMPLE: u16 = 16;

// Summaries
pub const PLAN_SUMMARY_MAX_CHARS: usize = 100;
pub const MARKET_SUMMARY_MAX_ITEMS: usize = 5;
/// Model turns that may request tools before a chat answer must be text.
pub const MAX_TOOL_ROUNDS: usize = 5;

/// Placeholder for weather fields the upstream could not provide.
pub const NOT_AVAILABLE: &str = "N/A";
