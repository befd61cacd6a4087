//! # AgriOne Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The shared HTTP client and error conversions
//! - Upstream integrations (Gemini, Visual Crossing, Fasal)
//! - Deterministic mock providers
//! - Configuration loading and tracing set-up
//!
//! ## Architecture
//! - Implements traits defined in `agrione-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod mock;
pub mod observability;
pub mod providers;

// Re-export commonly used items
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::{FasalClient, GeminiClient, GeminiError, VisualCrossingClient};
pub use observability::init_tracing;
pub use providers::ProviderSet;
