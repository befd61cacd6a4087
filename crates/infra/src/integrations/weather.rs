//! Visual Crossing timeline API client

use agrione_core::WeatherProvider;
use agrione_domain::{AgriError, ApiKey, Result, WeatherConfig, WeatherData};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::instrument;

use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    days: Vec<DayReading>,
}

/// Only the fields the dashboard shows. Visual Crossing sends `null` for
/// readings it has no data for.
#[derive(Debug, Deserialize)]
struct DayReading {
    temp: Option<f64>,
    windspeed: Option<f64>,
    humidity: Option<f64>,
    precip: Option<f64>,
}

pub struct VisualCrossingClient {
    http_client: HttpClient,
    api_key: ApiKey,
    base_url: String,
}

impl VisualCrossingClient {
    pub fn new(config: &WeatherConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, location: &str) -> String {
        format!("{}/{}/today", self.base_url, urlencoding::encode(location))
    }
}

#[async_trait]
impl WeatherProvider for VisualCrossingClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_configured()
    }

    #[instrument(skip(self))]
    async fn current_weather(&self, location: &str) -> Result<WeatherData> {
        let builder = self.http_client.request(Method::GET, self.endpoint(location)).query(&[
            ("unitGroup", "metric"),
            ("key", self.api_key.expose()),
            ("include", "current"),
        ]);

        let response = self.http_client.send_checked(builder).await?;
        let timeline: TimelineResponse = response
            .json()
            .await
            .map_err(|e| AgriError::invalid_response(format!("weather response: {e}")))?;

        let today = timeline.days.into_iter().next().ok_or_else(|| {
            AgriError::invalid_response(format!("no weather readings for {location}"))
        })?;
        let temp = today
            .temp
            .ok_or_else(|| AgriError::invalid_response("weather response has no temperature"))?;

        Ok(WeatherData::from_readings(
            temp,
            today.windspeed.unwrap_or(0.0),
            today.humidity.unwrap_or(0.0),
            today.precip.unwrap_or(0.0),
        ))
    }
}

#[cfg(test)]
mod tests {
    use agrione_common::{ErrorClassification, FailureClass};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> VisualCrossingClient {
        let config = WeatherConfig { api_key: ApiKey::new("vc-key"), base_url: server.uri() };
        VisualCrossingClient::new(&config, HttpClient::new().unwrap())
    }

    #[tokio::test]
    async fn reads_first_day() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/New%20Delhi/today"))
            .and(query_param("unitGroup", "metric"))
            .and(query_param("key", "vc-key"))
            .and(query_param("include", "current"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resolvedAddress": "New Delhi, India",
                "days": [
                    { "temp": 33.4, "windspeed": 11.2, "humidity": 48.0, "precip": null },
                    { "temp": 30.0, "windspeed": 9.0, "humidity": 50.0, "precip": 1.0 }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let weather = client(&server).current_weather("New Delhi").await.unwrap();

        assert_eq!(weather, WeatherData::from_readings(33.4, 11.2, 48.0, 0.0));
    }

    #[tokio::test]
    async fn unknown_location_is_permanent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Bad API Request:Invalid location parameter value."))
            .mount(&server)
            .await;

        let err = client(&server).current_weather("Atlantis").await.unwrap_err();

        assert_eq!(err.classification(), FailureClass::Permanent);
        assert!(err.to_string().contains("Invalid location"));
    }

    #[tokio::test]
    async fn empty_days_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "days": [] })))
            .mount(&server)
            .await;

        let err = client(&server).current_weather("Pune").await.unwrap_err();

        assert!(matches!(err, AgriError::InvalidResponse(_)));
    }
}
