//! Shared test helpers for `agrione-core` integration tests.
//!
//! Fake providers driven by closures, with call counters, so tests can
//! script upstream behaviour per call and assert how often it was reached.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agrione_common::RetryExecutor;
use agrione_core::{
    retry_policy, GenerativeModel, MarketPriceProvider, ModelReply, Providers, SpeechSynthesizer,
    StructuredPrompt, ToolConversation, WeatherProvider,
};
use agrione_domain::{AgriError, Commodity, Result, RetrySettings, WeatherData};
use async_trait::async_trait;
use serde_json::Value;

type JsonHandler = dyn Fn(u32, &StructuredPrompt) -> Result<Value> + Send + Sync;
type ChatHandler = dyn Fn(u32, &ToolConversation) -> Result<ModelReply> + Send + Sync;

/// Model fake: `handler(call_index, prompt)` produces each answer. The
/// index counts JSON and chat calls together.
pub struct FakeModel {
    configured: bool,
    json: Box<JsonHandler>,
    chat: Box<ChatHandler>,
    delay: Duration,
    calls: AtomicU32,
}

impl FakeModel {
    pub fn json(handler: impl Fn(u32, &StructuredPrompt) -> Result<Value> + Send + Sync + 'static) -> Self {
        Self {
            configured: true,
            json: Box::new(handler),
            chat: Box::new(|_, _| Err(AgriError::Internal("chat not scripted".into()))),
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        }
    }

    pub fn chat(
        handler: impl Fn(u32, &ToolConversation) -> Result<ModelReply> + Send + Sync + 'static,
    ) -> Self {
        Self {
            configured: true,
            json: Box::new(|_, _| Err(AgriError::Internal("json not scripted".into()))),
            chat: Box::new(handler),
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        }
    }

    /// Also answer JSON prompts, for chats whose tools call the model.
    pub fn with_json(
        mut self,
        handler: impl Fn(u32, &StructuredPrompt) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.json = Box::new(handler);
        self
    }

    /// A model without credentials; any call is a test failure.
    pub fn unconfigured() -> Self {
        Self { configured: false, ..Self::json(|_, _| panic!("unconfigured model was called")) }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate_json(&self, request: &StructuredPrompt) -> Result<Value> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.json)(index, request)
    }

    async fn converse(&self, conversation: &ToolConversation) -> Result<ModelReply> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        (self.chat)(index, conversation)
    }
}

pub struct FakeSpeech {
    configured: bool,
    calls: AtomicU32,
}

impl FakeSpeech {
    pub fn new(configured: bool) -> Self {
        Self { configured, calls: AtomicU32::new(0) }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn synthesize(&self, _text: &str, _voice: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0, 0, 255, 127])
    }
}

type WeatherHandler = dyn Fn(u32) -> Result<WeatherData> + Send + Sync;

pub struct FakeWeather {
    configured: bool,
    handler: Box<WeatherHandler>,
    delay: Duration,
    calls: AtomicU32,
}

impl FakeWeather {
    pub fn new(handler: impl Fn(u32) -> Result<WeatherData> + Send + Sync + 'static) -> Self {
        Self { configured: true, handler: Box::new(handler), delay: Duration::ZERO, calls: AtomicU32::new(0) }
    }

    pub fn sunny() -> Self {
        Self::new(|_| Ok(WeatherData::from_readings(31.0, 8.0, 40.0, 0.0)))
    }

    pub fn unconfigured() -> Self {
        Self { configured: false, ..Self::new(|_| panic!("unconfigured weather was called")) }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn current_weather(&self, _location: &str) -> Result<WeatherData> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.handler)(index)
    }
}

type MarketHandler = dyn Fn(u32, &str) -> Result<Vec<Commodity>> + Send + Sync;

pub struct FakeMarket {
    configured: bool,
    handler: Box<MarketHandler>,
    calls: AtomicU32,
}

impl FakeMarket {
    pub fn new(handler: impl Fn(u32, &str) -> Result<Vec<Commodity>> + Send + Sync + 'static) -> Self {
        Self { configured: true, handler: Box::new(handler), calls: AtomicU32::new(0) }
    }

    pub fn unconfigured() -> Self {
        Self { configured: false, ..Self::new(|_, _| panic!("unconfigured market was called")) }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketPriceProvider for FakeMarket {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn commodity_prices(&self, market: &str) -> Result<Vec<Commodity>> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(index, market)
    }
}

/// Fakes kept as concrete types so tests can read their counters.
pub struct Fakes {
    pub model: Arc<FakeModel>,
    pub speech: Arc<FakeSpeech>,
    pub weather: Arc<FakeWeather>,
    pub market: Arc<FakeMarket>,
}

impl Fakes {
    pub fn new(model: FakeModel, weather: FakeWeather, market: FakeMarket) -> Self {
        Self {
            model: Arc::new(model),
            speech: Arc::new(FakeSpeech::new(true)),
            weather: Arc::new(weather),
            market: Arc::new(market),
        }
    }

    pub fn with_speech(mut self, speech: FakeSpeech) -> Self {
        self.speech = Arc::new(speech);
        self
    }

    pub fn providers(&self) -> Providers {
        Providers {
            model: self.model.clone(),
            speech: self.speech.clone(),
            weather: self.weather.clone(),
            market: self.market.clone(),
        }
    }
}

/// Executor with the default `{3, 500ms}` policy.
pub fn executor() -> RetryExecutor {
    RetryExecutor::new(retry_policy(&RetrySettings::default()).expect("default policy"))
}

pub fn unavailable() -> AgriError {
    AgriError::upstream(503, "Service Unavailable")
}
