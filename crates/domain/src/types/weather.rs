//! Weather data and pest/disease alerts

use serde::{Deserialize, Serialize};

use super::required;
use crate::constants::NOT_AVAILABLE;
use crate::errors::{AgriError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlertsRequest {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub crop_type: String,
}

impl WeatherAlertsRequest {
    /// Both fields are required; returns them trimmed.
    pub fn validate(&self) -> Result<(&str, &str)> {
        const MESSAGE: &str = "Location and Crop Type are required.";
        Ok((required(&self.location, MESSAGE)?, required(&self.crop_type, MESSAGE)?))
    }
}

/// Current conditions, pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub temperature: String,
    pub wind: String,
    pub humidity: String,
    pub precipitation: String,
}

impl WeatherData {
    /// Every field "N/A"; shown when the weather upstream is unreachable.
    pub fn unavailable() -> Self {
        Self {
            temperature: NOT_AVAILABLE.to_string(),
            wind: NOT_AVAILABLE.to_string(),
            humidity: NOT_AVAILABLE.to_string(),
            precipitation: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        *self == Self::unavailable()
    }

    /// Format raw metric readings the way the dashboard shows them.
    pub fn from_readings(temp_c: f64, wind_kmh: f64, humidity_pct: f64, precip_mm: f64) -> Self {
        Self {
            temperature: format!("{temp_c:.1}°C"),
            wind: format!("{wind_kmh:.1} km/h"),
            humidity: format!("{humidity_pct:.1}%"),
            precipitation: format!("{precip_mm:.1} mm"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PestAlerts {
    pub alerts: Vec<String>,
}

/// Combined result of the weather alerts feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlerts {
    pub alerts: Vec<String>,
    pub weather: WeatherData,
    pub location: String,
    pub crop_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateAlertsRequest {
    #[serde(default)]
    pub alerts: Vec<String>,
    pub language_code: String,
}

impl TranslateAlertsRequest {
    pub fn validate(&self) -> Result<()> {
        if self.alerts.is_empty() {
            return Err(AgriError::invalid_input("Alerts are missing."));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_fields_required() {
        let request = WeatherAlertsRequest { location: "Bhopal".into(), crop_type: "  ".into() };
        assert_eq!(
            request.validate().unwrap_err().to_string(),
            "Location and Crop Type are required."
        );

        let request = WeatherAlertsRequest { location: " Pune ".into(), crop_type: "Rice".into() };
        assert_eq!(request.validate().unwrap(), ("Pune", "Rice"));
    }

    #[test]
    fn test_unavailable_weather() {
        let weather = WeatherData::unavailable();
        assert_eq!(weather.temperature, "N/A");
        assert!(weather.is_unavailable());
        assert!(!WeatherData::from_readings(1.0, 2.0, 3.0, 4.0).is_unavailable());
    }

    #[test]
    fn test_readings_format() {
        let weather = WeatherData::from_readings(28.46, 12.0, 61.24, 0.0);
        assert_eq!(weather.temperature, "28.5°C");
        assert_eq!(weather.wind, "12.0 km/h");
        assert_eq!(weather.humidity, "61.2%");
        assert_eq!(weather.precipitation, "0.0 mm");
    }

    #[test]
    fn test_empty_alert_list_rejected() {
        let request = TranslateAlertsRequest { alerts: vec![], language_code: "hi".into() };
        assert!(request.validate().is_err());
    }
}
