//! Port interfaces for upstream providers
//!
//! These traits define the boundaries between the flows and the clients in
//! `agrione-infra`. Every port reports whether its credential is configured
//! so flows can take the fallback path without calling the upstream.

use std::sync::Arc;

use agrione_domain::{Commodity, InlineImage, Result, WeatherData};
use async_trait::async_trait;
use serde_json::Value;

/// A prompt whose answer must be JSON matching `schema`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPrompt {
    pub prompt: String,
    /// Response schema in the OpenAPI subset the model accepts.
    pub schema: Value,
    pub image: Option<InlineImage>,
}

impl StructuredPrompt {
    pub fn new(prompt: impl Into<String>, schema: Value) -> Self {
        Self { prompt: prompt.into(), schema, image: None }
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// A function the model may call while answering a chat query.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    /// Argument schema in the same OpenAPI subset as [`StructuredPrompt::schema`].
    pub parameters: Value,
}

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub args: Value,
}

/// The answer to one [`ToolCall`], handed back to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub name: String,
    /// Always a JSON object
    pub response: Value,
}

/// One model turn that asked for tools, with what the tools returned.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRound {
    pub calls: Vec<ToolCall>,
    pub results: Vec<ToolResult>,
}

/// A free-text prompt plus the tools the model may use and every completed
/// tool round so far.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConversation {
    pub prompt: String,
    pub tools: Vec<ToolDeclaration>,
    pub rounds: Vec<ToolRound>,
}

impl ToolConversation {
    pub fn new(prompt: impl Into<String>, tools: Vec<ToolDeclaration>) -> Self {
        Self { prompt: prompt.into(), tools, rounds: Vec::new() }
    }
}

/// What the model answered on one turn of a [`ToolConversation`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    Text(String),
    ToolCalls(Vec<ToolCall>),
}

/// Hosted large language model
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Whether a usable credential is configured
    fn is_configured(&self) -> bool;

    /// Generate a JSON document constrained by the prompt's schema
    async fn generate_json(&self, request: &StructuredPrompt) -> Result<Value>;

    /// Run one turn of a tool-enabled conversation: either the final text
    /// or the function calls the model wants answered first
    async fn converse(&self, conversation: &ToolConversation) -> Result<ModelReply>;
}

/// Text-to-speech model
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn is_configured(&self) -> bool;

    /// Synthesize `text` with a prebuilt voice, returning raw PCM
    /// (24 kHz, mono, signed 16-bit little endian)
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>>;
}

/// Current weather conditions for a location
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn current_weather(&self, location: &str) -> Result<WeatherData>;
}

/// Commodity prices for an agricultural market
#[async_trait]
pub trait MarketPriceProvider: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn commodity_prices(&self, market: &str) -> Result<Vec<Commodity>>;
}

/// The full set of upstream ports a dashboard needs.
#[derive(Clone)]
pub struct Providers {
    pub model: Arc<dyn GenerativeModel>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub weather: Arc<dyn WeatherProvider>,
    pub market: Arc<dyn MarketPriceProvider>,
}

impl std::fmt::Debug for Providers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Providers")
            .field("model_configured", &self.model.is_configured())
            .field("speech_configured", &self.speech.is_configured())
            .field("weather_configured", &self.weather.is_configured())
            .field("market_configured", &self.market.is_configured())
            .finish()
    }
}
