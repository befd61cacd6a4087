/// Gemini integration for structured generation, free text and speech
///
/// # Architecture
///
/// - **Client**: `GeminiClient` - implements the `GenerativeModel` and
///   `SpeechSynthesizer` ports over the `generateContent` REST endpoint
/// - **Types**: request/response wire types and `GeminiError`
///
/// # Error Handling
///
/// - **Network errors and non-2xx statuses**: returned as classified
///   `AgriError`s; retrying is left to the flow's executor
/// - **Blocked, empty or malformed output**: `AgriError::InvalidResponse`,
///   which is permanent
pub mod client;
pub mod types;

pub use client::GeminiClient;
pub use types::GeminiError;
