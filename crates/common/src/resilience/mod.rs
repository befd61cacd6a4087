//! Resilience patterns for remote calls.
//!
//! - **Retry**: bounded attempts with linear backoff, retrying only failures
//!   classified as transient
//! - **Fallback**: precondition check plus substitution of a safe value when
//!   the live call is skipped or fails
//! - **State**: the per-call state machine the executor records
//!
//! Everything here is generic over the work's value and error types. Errors
//! opt in by implementing [`crate::error::ErrorClassification`].

pub mod fallback;
pub mod retry;
pub mod state;

pub use fallback::{
    execute_with_fallback, Fallback, FallbackMode, FallbackSource, Precondition, Resolved,
};
pub use retry::{
    execute_with_retry, AttemptOutcome, AttemptRecord, RetryError, RetryExecutor, RetryOutcome,
    RetryPolicy, RetryPolicyBuilder, RetryResult, MAX_ATTEMPTS_LIMIT, UNAVAILABLE_MESSAGE,
};
pub use state::{CallState, CallStateError, CallStateMachine};
