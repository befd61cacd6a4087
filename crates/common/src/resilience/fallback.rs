//! Fallback substitution around retried remote calls.
//!
//! A fallback call checks a precondition first (typically "is the upstream
//! credential configured?"). When it is unmet the fallback value is returned
//! without touching the upstream. Otherwise the work runs under the retry
//! executor and a failure is either absorbed into the fallback value or
//! surfaced, depending on [`FallbackMode`].

use std::borrow::Cow;
use std::fmt;
use std::future::Future;

use tracing::{info, warn};

use super::retry::{RetryError, RetryExecutor, RetryResult};
use crate::error::ErrorClassification;

/// Substitute value used when the live call is skipped or fails.
pub enum Fallback<T> {
    /// A ready value.
    Value(T),
    /// Computed only when needed.
    Lazy(Box<dyn FnOnce() -> T + Send>),
}

impl<T> Fallback<T> {
    pub fn value(value: T) -> Self {
        Self::Value(value)
    }

    pub fn lazy(make: impl FnOnce() -> T + Send + 'static) -> Self {
        Self::Lazy(Box::new(make))
    }

    /// Produce the substitute value.
    pub fn resolve(self) -> T {
        match self {
            Self::Value(value) => value,
            Self::Lazy(make) => make(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Fallback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// Whether the live call may be attempted at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    Met,
    /// Unmet, with a reason for the log line.
    Unmet(Cow<'static, str>),
}

impl Precondition {
    /// `Met` when `condition` holds, otherwise `Unmet(reason)`.
    pub fn require(condition: bool, reason: impl Into<Cow<'static, str>>) -> Self {
        if condition {
            Self::Met
        } else {
            Self::Unmet(reason.into())
        }
    }

    pub fn is_met(&self) -> bool {
        matches!(self, Self::Met)
    }
}

/// How a failed live call is reported once retries are over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackMode {
    /// Any failure becomes the fallback value.
    #[default]
    Absorb,
    /// Exhausted transient failures surface as the unavailable error; any
    /// other failure becomes the fallback value.
    SurfaceUnavailable,
    /// Every failure surfaces; the fallback is used only for an unmet
    /// precondition.
    SurfaceAll,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackSource {
    /// The upstream produced it.
    Live,
    /// The precondition was unmet; the upstream was never called.
    Precondition(Cow<'static, str>),
    /// The live call failed and the failure was absorbed.
    Failure(String),
}

/// A value together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: FallbackSource,
}

impl<T> Resolved<T> {
    pub fn live(value: T) -> Self {
        Self { value, source: FallbackSource::Live }
    }

    /// True when the value is a substitute rather than upstream data.
    pub fn is_fallback(&self) -> bool {
        !matches!(self.source, FallbackSource::Live)
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved { value: f(self.value), source: self.source }
    }
}

/// Run `work` under `executor` unless `precondition` is unmet, substituting
/// `fallback` according to `mode`.
///
/// The fallback is never observed alongside a live value: exactly one of them
/// is returned, or an error when `mode` surfaces the failure.
pub async fn execute_with_fallback<F, Fut, T, E>(
    precondition: Precondition,
    work: F,
    fallback: Fallback<T>,
    mode: FallbackMode,
    executor: &RetryExecutor,
) -> RetryResult<Resolved<T>, E>
where
    E: ErrorClassification + fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Precondition::Unmet(reason) = precondition {
        warn!(%reason, "Skipping remote call, returning fallback");
        return Ok(Resolved { value: fallback.resolve(), source: FallbackSource::Precondition(reason) });
    }

    match executor.execute(work).await {
        Ok(value) => Ok(Resolved::live(value)),
        Err(err) => {
            let surface = match mode {
                FallbackMode::Absorb => false,
                FallbackMode::SurfaceUnavailable => err.is_unavailable(),
                FallbackMode::SurfaceAll => true,
            };
            if surface || matches!(err, RetryError::InvalidPolicy { .. }) {
                return Err(err);
            }
            let message = describe(&err);
            info!(error = %message, "Remote call failed, substituting fallback");
            Ok(Resolved { value: fallback.resolve(), source: FallbackSource::Failure(message) })
        }
    }
}

fn describe<E: fmt::Display>(err: &RetryError<E>) -> String {
    match err {
        RetryError::Unavailable { last, .. } => last.to_string(),
        other => other.to_string(),
    }
}
