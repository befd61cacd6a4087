//! Configuration loader
//!
//! Loads application configuration from a file, then applies environment
//! overrides.
//!
//! ## Loading Strategy
//! 1. Searches several paths for a config file (JSON or TOML)
//! 2. Starts from built-in defaults when no file exists
//! 3. Applies environment overrides on top
//! 4. Validates the result
//!
//! ## Environment Variables
//! - `GEMINI_API_KEY`, `VISUAL_CROSSING_API_KEY`, `FASAL_API_KEY`: upstream
//!   credentials
//! - `AGRIONE_CONFIG`: explicit config file path
//! - `AGRIONE_PROVIDER_MODE`: `live` or `mock`
//! - `AGRIONE_BIND_ADDR`: server listen address
//! - `AGRIONE_LOG_LEVEL`, `AGRIONE_LOG_FORMAT`: logging
//! - `AGRIONE_RETRY_MAX_ATTEMPTS`, `AGRIONE_RETRY_BASE_DELAY_MS`,
//!   `AGRIONE_RETRY_ATTEMPT_TIMEOUT_MS`: retry policy
//! - `AGRIONE_HTTP_TIMEOUT_SECS`: upstream HTTP timeout
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./config.toml`, `./config.json`, `./agrione.toml`, `./agrione.json`
//! 2. The same names one and two directories up
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use agrione_domain::{AgriError, ApiKey, Config, Result};

const CONFIG_FILE_NAMES: &[&str] = &["config.toml", "config.json", "agrione.toml", "agrione.json"];

/// Load configuration from the first config file found (or defaults), with
/// environment overrides applied.
///
/// # Errors
/// Returns `AgriError::Config` if:
/// - `AGRIONE_CONFIG` names a missing file
/// - The file format is invalid
/// - An override has an invalid value
/// - The merged configuration fails validation
pub fn load() -> Result<Config> {
    let explicit = std::env::var("AGRIONE_CONFIG").ok().map(PathBuf::from);
    let mut config = match explicit.or_else(discover_config_paths) {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::info!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches several locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AgriError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AgriError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => discover_config_paths().ok_or_else(|| {
            AgriError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AgriError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AgriError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AgriError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(AgriError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Search several paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn discover_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Empty values are ignored so an unset `KEY=` line in a `.env` file does
/// not clobber the file configuration.
///
/// # Errors
/// Returns `AgriError::Config` when a numeric or enum override does not
/// parse.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(key) = get("GEMINI_API_KEY") {
        config.gemini.api_key = ApiKey::new(key);
    }
    if let Some(key) = get("VISUAL_CROSSING_API_KEY") {
        config.weather.api_key = ApiKey::new(key);
    }
    if let Some(key) = get("FASAL_API_KEY") {
        config.market.api_key = ApiKey::new(key);
    }
    if let Some(mode) = get("AGRIONE_PROVIDER_MODE") {
        config.providers.mode = parse_value("AGRIONE_PROVIDER_MODE", &mode)?;
    }
    if let Some(addr) = get("AGRIONE_BIND_ADDR") {
        config.server.bind_addr = addr;
    }
    if let Some(level) = get("AGRIONE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = get("AGRIONE_LOG_FORMAT") {
        config.logging.format = parse_value("AGRIONE_LOG_FORMAT", &format)?;
    }
    if let Some(value) = get("AGRIONE_RETRY_MAX_ATTEMPTS") {
        config.retry.max_attempts = parse_value("AGRIONE_RETRY_MAX_ATTEMPTS", &value)?;
    }
    if let Some(value) = get("AGRIONE_RETRY_BASE_DELAY_MS") {
        config.retry.base_delay_ms = parse_value("AGRIONE_RETRY_BASE_DELAY_MS", &value)?;
    }
    if let Some(value) = get("AGRIONE_RETRY_ATTEMPT_TIMEOUT_MS") {
        config.retry.attempt_timeout_ms = parse_value("AGRIONE_RETRY_ATTEMPT_TIMEOUT_MS", &value)?;
    }
    if let Some(value) = get("AGRIONE_HTTP_TIMEOUT_SECS") {
        config.http.timeout_secs = parse_value("AGRIONE_HTTP_TIMEOUT_SECS", &value)?;
    }
    Ok(())
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| AgriError::Config(format!("Invalid value for {key}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use agrione_domain::{LogFormat, ProviderMode};
    use tempfile::NamedTempFile;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_apply() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            lookup(&[
                ("GEMINI_API_KEY", "AIza-test"),
                ("FASAL_API_KEY", "fasal"),
                ("AGRIONE_PROVIDER_MODE", "MOCK"),
                ("AGRIONE_LOG_FORMAT", "json"),
                ("AGRIONE_RETRY_MAX_ATTEMPTS", "5"),
                ("AGRIONE_RETRY_ATTEMPT_TIMEOUT_MS", "0"),
            ]),
        )
        .unwrap();

        assert!(config.gemini.api_key.is_configured());
        assert_eq!(config.market.api_key.expose(), "fasal");
        assert!(!config.weather.api_key.is_configured());
        assert_eq!(config.providers.mode, ProviderMode::Mock);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.attempt_timeout(), None);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = Config::default();
        config.gemini.api_key = ApiKey::new("from-file");

        apply_env_overrides(&mut config, lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();

        assert_eq!(config.gemini.api_key.expose(), "from-file");
    }

    #[test]
    fn test_invalid_env_number() {
        let mut config = Config::default();
        let err = apply_env_overrides(&mut config, lookup(&[("AGRIONE_RETRY_BASE_DELAY_MS", "soon")]))
            .unwrap_err();

        assert!(matches!(err, AgriError::Config(msg) if msg.contains("AGRIONE_RETRY_BASE_DELAY_MS")));
    }

    #[test]
    fn test_oversized_attempt_budget_fails_validation() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, lookup(&[("AGRIONE_RETRY_MAX_ATTEMPTS", "4294967295")]))
            .unwrap();

        assert_eq!(config.retry.max_attempts, u32::MAX);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("retry.max_attempts must be at most 10"));
    }

    #[test]
    fn test_invalid_env_mode() {
        let mut config = Config::default();
        let err =
            apply_env_overrides(&mut config, lookup(&[("AGRIONE_PROVIDER_MODE", "staging")])).unwrap_err();

        assert!(err.to_string().contains("Invalid ProviderMode: staging"));
    }

    #[test]
    fn test_load_from_file_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[retry]\nbase_delay_ms = 250\n\n[server]\nbind_addr = \"0.0.0.0:9000\"").unwrap();

        let config = load_from_file(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.retry.base_delay_ms, 250);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_from_file(Some(file.path().to_path_buf())).unwrap_err();

        assert!(matches!(err, AgriError::Config(msg) if msg.starts_with("Invalid JSON format")));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("yaml");
        std::fs::write(&path, "retry: {}").unwrap();

        let err = load_from_file(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format: yaml"));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/agrione.toml"))).unwrap_err();
        assert!(matches!(err, AgriError::Config(msg) if msg.contains("not found")));
    }
}
