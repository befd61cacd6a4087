//! Modular common utilities shared across AgriOne crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: failure classification and severity
//! - `runtime`: async resilience (retry, fallback, attempt state machine)
//! - `test-utils`: scripted work helpers for exercising the orchestrator

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod error;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod resilience;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", all(test, feature = "runtime")))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use error::{
    classify_message, classify_status, ErrorClassification, ErrorSeverity, FailureClass,
};
#[cfg(feature = "runtime")]
pub use resilience::{
    execute_with_fallback, execute_with_retry, AttemptOutcome, AttemptRecord, CallState,
    CallStateError, CallStateMachine, Fallback, FallbackMode, FallbackSource, Precondition,
    Resolved, RetryError, RetryExecutor, RetryOutcome, RetryPolicy, RetryPolicyBuilder,
    RetryResult, MAX_ATTEMPTS_LIMIT, UNAVAILABLE_MESSAGE,
};
