//! Error types used throughout the application

use std::time::Duration;

use agrione_common::error::{classify_status, ErrorClassification, ErrorSeverity, FailureClass};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for AgriOne
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AgriError {
    /// An upstream API answered with a non-success status.
    #[error("[{status}] {message}")]
    Upstream {
        status: u16,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        retry_after_secs: Option<u64>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Retries against an overloaded upstream were exhausted.
    #[error("The AI service is temporarily unavailable. Please try again in a few moments.")]
    ServiceUnavailable,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AgriError {
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream { status, message: message.into(), retry_after_secs: None }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

impl ErrorClassification for AgriError {
    fn classification(&self) -> FailureClass {
        match self {
            Self::Upstream { status, .. } => classify_status(*status),
            Self::Network(_) | Self::Timeout(_) | Self::ServiceUnavailable => {
                FailureClass::Transient
            }
            Self::InvalidInput(_)
            | Self::InvalidResponse(_)
            | Self::Config(_)
            | Self::Internal(_) => FailureClass::Permanent,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidInput(_) => ErrorSeverity::Info,
            Self::Network(_) | Self::Timeout(_) | Self::ServiceUnavailable => {
                ErrorSeverity::Warning
            }
            Self::Upstream { .. } | Self::InvalidResponse(_) => ErrorSeverity::Error,
            Self::Config(_) | Self::Internal(_) => ErrorSeverity::Critical,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Upstream { retry_after_secs: Some(secs), .. } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AgriError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

/// Result type alias for AgriOne operations
pub type Result<T> = std::result::Result<T, AgriError>;
