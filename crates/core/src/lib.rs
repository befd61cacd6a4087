//! # AgriOne Core
//!
//! Business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the model, speech, weather and market
//!   upstreams
//! - Feature flows built on the resilience executor
//! - The action layer producing dashboard view-models
//!
//! ## Architecture Principles
//! - Only depends on `agrione-common` and `agrione-domain`
//! - No HTTP or configuration loading
//! - All upstreams via traits
//! - Pure, testable business logic

pub mod actions;
pub mod fallbacks;
pub mod flows;
pub mod ports;
pub mod prompts;

pub use actions::{ActionState, DashboardActions};
pub use flows::retry_policy;
pub use ports::{
    GenerativeModel, MarketPriceProvider, ModelReply, Providers, SpeechSynthesizer,
    StructuredPrompt, ToolCall, ToolConversation, ToolDeclaration, ToolResult, ToolRound,
    WeatherProvider,
};
