//! Deterministic providers for `providers.mode = "mock"`
//!
//! They never touch the network and always report a configured credential,
//! so every flow runs its live path against predictable data.

use agrione_core::fallbacks::sample_commodities;
use agrione_core::{
    GenerativeModel, MarketPriceProvider, ModelReply, SpeechSynthesizer, StructuredPrompt,
    ToolConversation, WeatherProvider,
};
use agrione_domain::constants::TTS_SAMPLE_RATE;
use agrione_domain::{Commodity, Result, WeatherData};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

/// Answers JSON prompts with a value shaped by the response schema.
#[derive(Debug, Default)]
pub struct MockModel;

/// Fill a schema with placeholder data: strings name their field, arrays
/// hold two items.
fn mock_value(schema: &Value, name: &str) -> Value {
    match schema.get("type").and_then(Value::as_str).unwrap_or("STRING") {
        "OBJECT" => {
            let properties = schema
                .get("properties")
                .and_then(Value::as_object)
                .map(|props| {
                    props.iter().map(|(key, prop)| (key.clone(), mock_value(prop, key))).collect()
                })
                .unwrap_or_else(Map::new);
            Value::Object(properties)
        }
        "ARRAY" => {
            let items = schema.get("items").cloned().unwrap_or(Value::Null);
            Value::Array(
                (1..=2).map(|i| mock_value(&items, &format!("{name} {i}"))).collect(),
            )
        }
        "NUMBER" | "INTEGER" => Value::from(0),
        "BOOLEAN" => Value::Bool(false),
        _ => Value::String(format!("Mock {name}")),
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    fn is_configured(&self) -> bool {
        true
    }

    async fn generate_json(&self, request: &StructuredPrompt) -> Result<Value> {
        debug!("Mock model answering structured prompt");
        Ok(mock_value(&request.schema, "response"))
    }

    /// Never requests tools.
    async fn converse(&self, _conversation: &ToolConversation) -> Result<ModelReply> {
        Ok(ModelReply::Text(
            "This is a mock answer from AgriOne AI.<br />Configure live providers for real advice."
                .to_string(),
        ))
    }
}

/// Produces a short clip of silence.
#[derive(Debug, Default)]
pub struct MockSpeech;

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    fn is_configured(&self) -> bool {
        true
    }

    async fn synthesize(&self, _text: &str, _voice: &str) -> Result<Vec<u8>> {
        // 100ms of 16-bit mono silence
        let samples = TTS_SAMPLE_RATE as usize / 10;
        Ok(vec![0; samples * 2])
    }
}

#[derive(Debug, Default)]
pub struct MockWeather;

#[async_trait]
impl WeatherProvider for MockWeather {
    fn is_configured(&self) -> bool {
        true
    }

    async fn current_weather(&self, _location: &str) -> Result<WeatherData> {
        Ok(WeatherData::from_readings(28.5, 12.0, 65.0, 0.4))
    }
}

#[derive(Debug, Default)]
pub struct MockMarket;

#[async_trait]
impl MarketPriceProvider for MockMarket {
    fn is_configured(&self) -> bool {
        true
    }

    async fn commodity_prices(&self, _market: &str) -> Result<Vec<Commodity>> {
        Ok(sample_commodities())
    }
}
