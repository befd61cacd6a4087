//! Bounded retry for remote calls with typed failure classification.
//!
//! The executor invokes a caller-supplied unit of work, classifies each
//! failure through [`ErrorClassification`] and retries only transient ones,
//! sleeping a linearly increasing delay between attempts. Attempts are
//! strictly sequential: attempt *n+1* starts only after attempt *n* failed and
//! its backoff elapsed.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use super::state::{CallState, CallStateMachine};
use crate::error::{ErrorClassification, FailureClass};

/// User-facing message for an upstream that stayed unavailable through every
/// attempt.
pub const UNAVAILABLE_MESSAGE: &str =
    "The AI service is temporarily unavailable. Please try again in a few moments.";

/// Errors that can occur during retry operations
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Every attempt failed transiently; the upstream is considered
    /// unavailable. Carries the last failure for diagnostics.
    #[error("The AI service is temporarily unavailable. Please try again in a few moments.")]
    Unavailable { attempts: u32, last: E },

    /// The work failed with a non-retryable error; propagated as-is.
    #[error("{error}")]
    Permanent { error: E },

    /// The final attempt exceeded the per-attempt deadline.
    #[error("Remote call did not complete within {deadline:?} (attempt {attempt})")]
    AttemptTimedOut { attempt: u32, deadline: Duration },

    /// The retry policy configuration is invalid
    #[error("Invalid retry policy: {message}")]
    InvalidPolicy { message: String },
}

impl<E> RetryError<E> {
    /// True when retries were exhausted on transient failures (including
    /// attempt timeouts).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::AttemptTimedOut { .. })
    }

    /// The underlying work error, if there is one.
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Unavailable { last, .. } => Some(last),
            Self::Permanent { error } => Some(error),
            Self::AttemptTimedOut { .. } | Self::InvalidPolicy { .. } => None,
        }
    }

    /// Convert the carried work error while keeping the variant.
    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> RetryError<F> {
        match self {
            Self::Unavailable { attempts, last } => RetryError::Unavailable { attempts, last: f(last) },
            Self::Permanent { error } => RetryError::Permanent { error: f(error) },
            Self::AttemptTimedOut { attempt, deadline } => {
                RetryError::AttemptTimedOut { attempt, deadline }
            }
            Self::InvalidPolicy { message } => RetryError::InvalidPolicy { message },
        }
    }
}

/// Result type for retry operations
pub type RetryResult<T, E> = Result<T, RetryError<E>>;

/// Largest attempt budget a policy accepts.
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Configuration for retry behavior
///
/// Backoff is linear: the delay after the failed attempt with 0-based index
/// `i` is `base_delay * (i + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of invocations of the work (initial try + retries)
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// Deadline for a single attempt; an attempt exceeding it counts as a
    /// transient failure.
    pub attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            attempt_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl RetryPolicy {
    /// Create a configuration builder
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::new()
    }

    /// Delay to wait after the failed attempt with the given 0-based index.
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        self.base_delay.saturating_mul(attempt_index.saturating_add(1))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RetryError<Infallible>> {
        if self.max_attempts == 0 {
            return Err(RetryError::InvalidPolicy {
                message: "max_attempts must be at least 1".to_string(),
            });
        }

        if self.max_attempts > MAX_ATTEMPTS_LIMIT {
            return Err(RetryError::InvalidPolicy {
                message: format!("max_attempts must be at most {MAX_ATTEMPTS_LIMIT}"),
            });
        }

        if self.attempt_timeout == Some(Duration::ZERO) {
            return Err(RetryError::InvalidPolicy {
                message: "attempt_timeout must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for RetryPolicy with fluent API
#[derive(Debug)]
pub struct RetryPolicyBuilder {
    policy: RetryPolicy,
}

impl Default for RetryPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicyBuilder {
    pub fn new() -> Self {
        Self { policy: RetryPolicy::default() }
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.policy.max_attempts = attempts;
        self
    }

    pub fn linear_backoff(mut self, base_delay: Duration) -> Self {
        self.policy.base_delay = base_delay;
        self
    }

    pub fn attempt_timeout(mut self, deadline: Duration) -> Self {
        self.policy.attempt_timeout = Some(deadline);
        self
    }

    pub fn no_attempt_timeout(mut self) -> Self {
        self.policy.attempt_timeout = None;
        self
    }

    pub fn build(self) -> Result<RetryPolicy, RetryError<Infallible>> {
        self.policy.validate()?;
        Ok(self.policy)
    }
}

/// What happened on one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    Failed { class: FailureClass, message: String },
    TimedOut { deadline: Duration },
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// One execution of the unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// 0-based attempt index
    pub index: u32,
    /// Time since the sequence started, measured when the attempt finished
    pub elapsed: Duration,
    pub outcome: AttemptOutcome,
    /// Backoff scheduled after this attempt, if another one followed
    pub delay_after: Option<Duration>,
}

/// Outcome of a retry execution including result and per-attempt records.
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    pub result: RetryResult<T, E>,
    pub attempts: Vec<AttemptRecord>,
    pub total_delay: Duration,
    pub states: Vec<CallState>,
}

impl<T, E> RetryOutcome<T, E> {
    /// Consume the outcome and return only the result.
    pub fn into_result(self) -> RetryResult<T, E> {
        self.result
    }

    /// Number of times the work was invoked.
    pub fn attempt_count(&self) -> u32 {
        u32::try_from(self.attempts.len()).unwrap_or(u32::MAX)
    }

    /// Backoff delays actually slept, in order.
    pub fn delays(&self) -> Vec<Duration> {
        self.attempts.iter().filter_map(|attempt| attempt.delay_after).collect()
    }
}

enum AttemptResult<T, E> {
    Finished(Result<T, E>),
    TimedOut(Duration),
}

/// The main retry executor
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    /// Create a new retry executor with the given policy
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute an operation with retry logic
    pub async fn execute<F, Fut, T, E>(&self, work: F) -> RetryResult<T, E>
    where
        E: ErrorClassification + fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.execute_with_outcome(work).await.into_result()
    }

    /// Execute an operation with retry logic and return per-attempt records.
    #[instrument(skip_all, fields(max_attempts = self.policy.max_attempts))]
    pub async fn execute_with_outcome<F, Fut, T, E>(&self, mut work: F) -> RetryOutcome<T, E>
    where
        E: ErrorClassification + fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let started = Instant::now();
        let mut machine = CallStateMachine::new();
        let mut attempts: Vec<AttemptRecord> = Vec::new();
        let mut total_delay = Duration::ZERO;
        let mut index: u32 = 0;

        loop {
            advance(&mut machine, CallState::Attempting);
            debug!("Executing remote call (attempt {}/{})", index + 1, max_attempts);

            let attempt = match self.policy.attempt_timeout {
                Some(deadline) => match tokio::time::timeout(deadline, work()).await {
                    Ok(result) => AttemptResult::Finished(result),
                    Err(_) => AttemptResult::TimedOut(deadline),
                },
                None => AttemptResult::Finished(work().await),
            };
            let elapsed = started.elapsed();
            let has_more = index + 1 < max_attempts;

            let (outcome, retry_hint, error) = match attempt {
                AttemptResult::Finished(Ok(value)) => {
                    if index > 0 {
                        debug!("Remote call succeeded after {} retries", index);
                    }
                    attempts.push(AttemptRecord {
                        index,
                        elapsed,
                        outcome: AttemptOutcome::Succeeded,
                        delay_after: None,
                    });
                    advance(&mut machine, CallState::Succeeded);
                    return RetryOutcome {
                        result: Ok(value),
                        attempts,
                        total_delay,
                        states: machine.into_history(),
                    };
                }
                AttemptResult::Finished(Err(error)) => {
                    let class = error.classification();
                    let outcome = AttemptOutcome::Failed { class, message: error.to_string() };
                    (outcome, error.retry_after(), Some(error))
                }
                AttemptResult::TimedOut(deadline) => {
                    warn!(attempt = index + 1, ?deadline, "Remote call exceeded attempt deadline");
                    (AttemptOutcome::TimedOut { deadline }, None, None)
                }
            };

            let retryable = match &outcome {
                AttemptOutcome::Failed { class, .. } => class.is_retryable(),
                AttemptOutcome::TimedOut { .. } => true,
                AttemptOutcome::Succeeded => false,
            };

            if retryable && has_more {
                let backoff = self.policy.delay_for(index);
                // A server hint may shorten the wait but never stretch it past the schedule
                let delay = retry_hint.map_or(backoff, |hint| hint.min(backoff));
                warn!("Remote call failed (attempt {}), retrying after {:?}", index + 1, delay);
                attempts.push(AttemptRecord { index, elapsed, outcome, delay_after: Some(delay) });
                advance(&mut machine, CallState::Retrying);
                tokio::time::sleep(delay).await;
                total_delay += delay;
                index += 1;
                continue;
            }

            let attempt_number = index + 1;
            let deadline = match &outcome {
                AttemptOutcome::TimedOut { deadline } => Some(*deadline),
                _ => None,
            };
            attempts.push(AttemptRecord { index, elapsed, outcome, delay_after: None });
            advance(&mut machine, CallState::Failed);

            let result = match (error, deadline) {
                (Some(error), _) if retryable => {
                    warn!(
                        "All {} attempts failed transiently, last error: {}",
                        attempt_number, error
                    );
                    Err(RetryError::Unavailable { attempts: attempt_number, last: error })
                }
                (Some(error), _) => {
                    debug!("Not retrying non-transient failure: {}", error);
                    Err(RetryError::Permanent { error })
                }
                (None, Some(deadline)) => {
                    Err(RetryError::AttemptTimedOut { attempt: attempt_number, deadline })
                }
                (None, None) => Err(RetryError::InvalidPolicy {
                    message: "attempt finished without a result".to_string(),
                }),
            };

            return RetryOutcome { result, attempts, total_delay, states: machine.into_history() };
        }
    }
}

fn advance(machine: &mut CallStateMachine, next: CallState) {
    if let Err(err) = machine.transition(next) {
        warn!(error = %err, "Ignoring invalid call state transition");
    }
}

/// Run `work` under `policy`: retry transient failures, propagate the rest.
pub async fn execute_with_retry<F, Fut, T, E>(work: F, policy: &RetryPolicy) -> RetryResult<T, E>
where
    E: ErrorClassification + fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Err(err) = policy.validate() {
        return Err(RetryError::InvalidPolicy { message: policy_message(err) });
    }
    RetryExecutor::new(policy.clone()).execute(work).await
}

fn policy_message(err: RetryError<Infallible>) -> String {
    match err {
        RetryError::InvalidPolicy { message } => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for backoff, policy validation and executor behaviour.
    //!
    //! Executor tests run on tokio's paused clock so backoff delays are exact.

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    #[derive(Debug, Clone)]
    struct Upstream(&'static str, FailureClass);

    impl fmt::Display for Upstream {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl ErrorClassification for Upstream {
        fn classification(&self) -> FailureClass {
            self.1
        }
    }

    fn policy(max_attempts: u32, base_ms: u64) -> RetryPolicy {
        RetryPolicy::builder()
            .max_attempts(max_attempts)
            .linear_backoff(Duration::from_millis(base_ms))
            .no_attempt_timeout()
            .build()
            .expect("valid policy")
    }

    #[test]
    fn test_linear_backoff_is_base_times_attempt_number() {
        let policy = policy(3, 500);
        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(1500));
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.attempt_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_policy_validation() {
        assert!(RetryPolicy::builder().max_attempts(0).build().is_err());
        assert!(RetryPolicy::builder().max_attempts(MAX_ATTEMPTS_LIMIT + 1).build().is_err());
        assert!(RetryPolicy::builder().max_attempts(u32::MAX).build().is_err());
        assert!(RetryPolicy::builder().attempt_timeout(Duration::ZERO).build().is_err());
        assert!(RetryPolicy::builder()
            .max_attempts(MAX_ATTEMPTS_LIMIT)
            .linear_backoff(Duration::ZERO)
            .build()
            .is_ok());
    }

    #[test]
    fn test_rejected_policy_formats_its_reason() {
        let err = RetryPolicy::builder().max_attempts(0).build().unwrap_err();
        assert_eq!(err.to_string(), "Invalid retry policy: max_attempts must be at least 1");

        let err = RetryPolicy::builder().max_attempts(11).build().unwrap_err();
        assert_eq!(err.to_string(), "Invalid retry policy: max_attempts must be at most 10");
    }

    #[test]
    fn test_unavailable_display_is_user_facing() {
        let err = RetryError::Unavailable { attempts: 3, last: "503".to_string() };
        assert_eq!(err.to_string(), UNAVAILABLE_MESSAGE);
        assert!(err.is_unavailable());
        assert_eq!(err.into_inner().as_deref(), Some("503"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_then_success_scenario() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let executor = RetryExecutor::new(policy(3, 500));

        let outcome = executor
            .execute_with_outcome(|| {
                let counter = Arc::clone(&counter);
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err("503 Service Unavailable".to_string())
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(outcome.attempt_count(), 3);
        assert_eq!(outcome.delays(), vec![Duration::from_millis(500), Duration::from_millis(1000)]);
        assert_eq!(outcome.total_delay, Duration::from_millis(1500));
        assert_eq!(
            outcome.states,
            vec![
                CallState::Idle,
                CallState::Attempting,
                CallState::Retrying,
                CallState::Attempting,
                CallState::Retrying,
                CallState::Attempting,
                CallState::Succeeded,
            ]
        );
        assert_eq!(outcome.into_result().unwrap(), "ok");
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_propagates_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let executor = RetryExecutor::new(policy(3, 500));
        let started = Instant::now();

        let outcome = executor
            .execute_with_outcome(|| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>("400 Bad Request".to_string())
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(outcome.total_delay, Duration::ZERO);
        match outcome.result {
            Err(RetryError::Permanent { error }) => assert_eq!(error, "400 Bad Request"),
            other => panic!("expected permanent error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_classification_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let executor = RetryExecutor::new(policy(3, 10));

        let result = executor
            .execute(|| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(Upstream("mystery", FailureClass::Unknown))
                }
            })
            .await;

        assert!(matches!(result, Err(RetryError::Permanent { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_transient_failures_surface_unavailable() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let executor = RetryExecutor::new(policy(4, 100));
        let started = Instant::now();

        let result = executor
            .execute(|| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(Upstream("overloaded", FailureClass::Transient))
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // 100 + 200 + 300
        assert_eq!(started.elapsed(), Duration::from_millis(600));
        match result {
            Err(RetryError::Unavailable { attempts, last }) => {
                assert_eq!(attempts, 4);
                assert_eq!(last.0, "overloaded");
            }
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_deadline_counts_as_transient() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let policy = RetryPolicy::builder()
            .max_attempts(2)
            .linear_backoff(Duration::from_millis(50))
            .attempt_timeout(Duration::from_secs(1))
            .build()
            .unwrap();

        let result = RetryExecutor::new(policy)
            .execute(|| {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        tokio::time::sleep(Duration::from_secs(60)).await;
                    }
                    Ok::<_, String>(7)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_attempt_timing_out_yields_timeout_error() {
        let policy = RetryPolicy::builder()
            .max_attempts(2)
            .linear_backoff(Duration::from_millis(10))
            .attempt_timeout(Duration::from_millis(200))
            .build()
            .unwrap();

        let result: RetryResult<(), String> = RetryExecutor::new(policy)
            .execute(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        match result {
            Err(err @ RetryError::AttemptTimedOut { .. }) => {
                assert!(err.is_unavailable());
                assert!(matches!(err, RetryError::AttemptTimedOut { attempt: 2, .. }));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[derive(Debug)]
    struct Throttled(Duration);

    impl fmt::Display for Throttled {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("429 Too Many Requests")
        }
    }

    impl ErrorClassification for Throttled {
        fn classification(&self) -> FailureClass {
            FailureClass::Transient
        }

        fn retry_after(&self) -> Option<Duration> {
            Some(self.0)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_retry_after_hint_stays_within_backoff_bound() {
        let started = Instant::now();

        let outcome = RetryExecutor::new(policy(3, 500))
            .execute_with_outcome(|| async { Err::<(), _>(Throttled(Duration::from_secs(3600))) })
            .await;

        // 500ms * (1 + 2)
        let bound = Duration::from_millis(1500);
        assert_eq!(outcome.delays(), vec![Duration::from_millis(500), Duration::from_millis(1000)]);
        assert_eq!(outcome.total_delay, bound);
        assert_eq!(started.elapsed(), bound);
        assert!(matches!(outcome.result, Err(RetryError::Unavailable { attempts: 3, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_retry_after_hint_shortens_backoff() {
        let outcome = RetryExecutor::new(policy(2, 500))
            .execute_with_outcome(|| async { Err::<(), _>(Throttled(Duration::from_millis(200))) })
            .await;

        assert_eq!(outcome.delays(), vec![Duration::from_millis(200)]);
    }

    #[tokio::test]
    async fn test_large_budget_succeeding_first_time() {
        let policy = RetryPolicy { max_attempts: u32::MAX, ..RetryPolicy::default() };

        let outcome = RetryExecutor::new(policy).execute_with_outcome(|| async { Ok::<_, String>(1) }).await;

        assert_eq!(outcome.attempt_count(), 1);
        assert_eq!(outcome.into_result().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_execute_with_retry_rejects_invalid_policy() {
        let bad = RetryPolicy { max_attempts: 0, ..RetryPolicy::default() };
        let calls = AtomicU32::new(0);

        let result = execute_with_retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, String>(()) }
            },
            &bad,
        )
        .await;

        assert!(matches!(result, Err(RetryError::InvalidPolicy { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeated_runs_are_independent() {
        let policy = policy(3, 1);
        let first = execute_with_retry(|| async { Ok::<_, String>(42) }, &policy).await.unwrap();
        let second = execute_with_retry(|| async { Ok::<_, String>(42) }, &policy).await.unwrap();
        assert_eq!(first, second);
    }
}
