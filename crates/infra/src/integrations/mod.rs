//! External service integrations

pub mod fasal;
pub mod gemini;
pub mod weather;

pub use fasal::FasalClient;
pub use gemini::{GeminiClient, GeminiError};
pub use weather::VisualCrossingClient;
