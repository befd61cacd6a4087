//! Failure classification shared by every remote-call boundary.
//!
//! Remote calls in AgriOne fail for two broad reasons: the upstream is
//! temporarily overloaded (worth retrying) or the request can never succeed
//! as sent (not worth retrying). This module gives errors a typed way to say
//! which one they are, so the retry executor never has to sniff message text.
//!
//! # Error Handling Architecture
//!
//! 1. **[`FailureClass`]**: the three-way verdict (`Transient`, `Permanent`,
//!    `Unknown`). Only `Transient` is retried.
//!
//! 2. **[`ErrorClassification`] trait**: implemented by every error that can
//!    cross the orchestrator. Module errors delegate to it for embedded
//!    errors.
//!
//! 3. **[`ErrorSeverity`]**: a unified severity level for logging decisions.
//!
//! ## Implementing the trait
//!
//! ```rust,ignore
//! use agrione_common::error::{ErrorClassification, ErrorSeverity, FailureClass};
//!
//! #[derive(Debug, thiserror::Error)]
//! pub enum WidgetError {
//!     #[error("widget service returned {0}")]
//!     Status(u16),
//!     #[error("widget payload invalid: {0}")]
//!     Invalid(String),
//! }
//!
//! impl ErrorClassification for WidgetError {
//!     fn classification(&self) -> FailureClass {
//!         match self {
//!             Self::Status(code) => agrione_common::classify_status(*code),
//!             Self::Invalid(_) => FailureClass::Permanent,
//!         }
//!     }
//!
//!     fn severity(&self) -> ErrorSeverity {
//!         ErrorSeverity::Error
//!     }
//! }
//! ```
//!
//! ## Legacy message classification
//!
//! Some callers only hold an error message (for instance errors bubbled up
//! from an SDK as text). [`classify_message`] keeps the historical rule for
//! those: a message mentioning `503` or "service unavailable" is transient.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Verdict on whether a failed remote call is worth attempting again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// The upstream is temporarily unavailable or overloaded; retry may
    /// succeed.
    Transient,
    /// The request can never succeed as sent (validation, credentials,
    /// malformed response).
    Permanent,
    /// The failure could not be classified. Treated as non-retryable.
    Unknown,
}

impl FailureClass {
    /// Whether the retry executor may attempt the call again.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Transient)
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::Permanent => write!(f, "permanent"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Trait implemented by errors that may be returned from orchestrated work.
pub trait ErrorClassification {
    /// Classify this failure.
    fn classification(&self) -> FailureClass;

    /// Get the error severity level
    ///
    /// Used for logging decisions.
    fn severity(&self) -> ErrorSeverity {
        match self.classification() {
            FailureClass::Transient => ErrorSeverity::Warning,
            FailureClass::Permanent | FailureClass::Unknown => ErrorSeverity::Error,
        }
    }

    /// Check if this error is retryable
    fn is_retryable(&self) -> bool {
        self.classification().is_retryable()
    }

    /// Get the suggested retry delay if applicable
    ///
    /// Returns `Some(Duration)` when the upstream told us how long to wait
    /// (e.g. from a Retry-After header). The executor never waits less than
    /// its own backoff.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Classify an HTTP status code returned by an upstream.
///
/// 503 (service unavailable), 429 (rate limited), 408 and 504 (timeouts) are
/// transient. Every other non-success status is permanent. Success statuses
/// are reported as `Unknown` because they are not failures at all.
pub fn classify_status(status: u16) -> FailureClass {
    match status {
        408 | 429 | 503 | 504 => FailureClass::Transient,
        400..=599 => FailureClass::Permanent,
        _ => FailureClass::Unknown,
    }
}

/// Classify an error that only carries message text.
///
/// Mirrors the rule the dashboard used before errors were typed: the message
/// mentions `503` or, case-insensitively, "service unavailable".
pub fn classify_message(message: &str) -> FailureClass {
    if message.contains("503") || message.to_lowercase().contains("service unavailable") {
        FailureClass::Transient
    } else {
        FailureClass::Permanent
    }
}

/// Plain string errors classify by message. Useful for ad-hoc work closures.
impl ErrorClassification for String {
    fn classification(&self) -> FailureClass {
        classify_message(self)
    }
}

impl ErrorClassification for &str {
    fn classification(&self) -> FailureClass {
        classify_message(self)
    }
}
