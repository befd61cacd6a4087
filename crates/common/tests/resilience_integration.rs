//! Integration tests for the resilience module
//!
//! Exercises retry and fallback through the public API with scripted work on
//! tokio's paused clock, so every backoff assertion is exact.

#![cfg(feature = "test-utils")]

use std::time::Duration;

use agrione_common::testing::ScriptedWork;
use agrione_common::{
    execute_with_fallback, execute_with_retry, AttemptOutcome, CallState, ErrorClassification,
    Fallback, FailureClass, FallbackMode, FallbackSource, Precondition, RetryError,
    RetryExecutor, RetryPolicy, UNAVAILABLE_MESSAGE,
};
use tokio::time::Instant;

/// Error carrying an HTTP-like status, classified the way upstream clients
/// classify their errors.
#[derive(Debug, Clone, PartialEq)]
struct StatusError(u16);

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upstream returned {}", self.0)
    }
}

impl ErrorClassification for StatusError {
    fn classification(&self) -> FailureClass {
        agrione_common::classify_status(self.0)
    }
}

fn policy(max_attempts: u32, base_delay_ms: u64) -> RetryPolicy {
    RetryPolicy::builder()
        .max_attempts(max_attempts)
        .linear_backoff(Duration::from_millis(base_delay_ms))
        .no_attempt_timeout()
        .build()
        .expect("valid policy")
}

/// Validates that always-transient work is invoked exactly `max_attempts`
/// times and the total backoff is the linear sum.
///
/// Assertions:
/// - invocation count equals the policy budget for several budgets
/// - elapsed clock time equals `D * (1 + .. + (N-1))`
/// - the error is the user-facing unavailable message
#[tokio::test(start_paused = true)]
async fn test_always_transient_exhausts_budget() {
    for (attempts, base_ms) in [(1_u32, 500_u64), (2, 500), (3, 500), (5, 40)] {
        let work = ScriptedWork::<(), StatusError>::new().then_err(StatusError(503));
        let started = Instant::now();

        let result = execute_with_retry(|| work.call(), &policy(attempts, base_ms)).await;

        let expected_backoff: u64 = (1..u64::from(attempts)).map(|i| i * base_ms).sum();
        assert_eq!(work.calls(), attempts);
        assert_eq!(started.elapsed(), Duration::from_millis(expected_backoff));
        let err = result.expect_err("work never succeeds");
        assert!(err.is_unavailable());
        assert_eq!(err.to_string(), UNAVAILABLE_MESSAGE);
    }
}

/// Validates that work succeeding on attempt k is invoked exactly k times.
#[tokio::test(start_paused = true)]
async fn test_success_on_kth_attempt() {
    for k in 1..=4_usize {
        let work = ScriptedWork::<usize, StatusError>::new()
            .then_err_times(StatusError(429), k - 1)
            .then_ok(k);

        let value = execute_with_retry(|| work.call(), &policy(4, 10)).await.unwrap();

        assert_eq!(value, k);
        assert_eq!(work.calls() as usize, k);
    }
}

/// Validates the dashboard's canonical scenario: two "503 Service
/// Unavailable" failures followed by success under `{3, 500ms}`.
///
/// Assertions:
/// - result is "ok" after 3 invocations
/// - gaps between invocations are 500ms then 1000ms
/// - recorded outcomes are failed, failed, succeeded
#[tokio::test(start_paused = true)]
async fn test_two_unavailable_then_ok() {
    let work = ScriptedWork::<&'static str, String>::new()
        .then_err_times("503 Service Unavailable".to_string(), 2)
        .then_ok("ok");
    let executor = RetryExecutor::new(policy(3, 500));

    let outcome = executor.execute_with_outcome(|| work.call()).await;

    assert_eq!(work.calls(), 3);
    assert_eq!(work.gaps(), vec![Duration::from_millis(500), Duration::from_millis(1000)]);
    assert!(matches!(
        outcome.attempts[0].outcome,
        AttemptOutcome::Failed { class: FailureClass::Transient, .. }
    ));
    assert!(outcome.attempts[2].outcome.is_success());
    assert_eq!(outcome.attempts[1].elapsed, Duration::from_millis(500));
    assert_eq!(outcome.into_result().unwrap(), "ok");
}

/// Validates that "400 Bad Request" propagates immediately under `{3, 500ms}`.
#[tokio::test(start_paused = true)]
async fn test_bad_request_propagates_immediately() {
    let work = ScriptedWork::<(), String>::new().then_err("400 Bad Request".to_string());
    let started = Instant::now();

    let result = execute_with_retry(|| work.call(), &policy(3, 500)).await;

    assert_eq!(work.calls(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
    match result {
        Err(RetryError::Permanent { error }) => assert_eq!(error, "400 Bad Request"),
        other => panic!("expected permanent error, got {other:?}"),
    }
}

/// Validates the recorded state history of a transient-then-success run.
#[tokio::test(start_paused = true)]
async fn test_state_history_for_single_retry() {
    let work = ScriptedWork::<u8, StatusError>::new().then_err(StatusError(503)).then_ok(1);

    let outcome = RetryExecutor::new(policy(3, 100)).execute_with_outcome(|| work.call()).await;

    assert_eq!(
        outcome.states,
        vec![
            CallState::Idle,
            CallState::Attempting,
            CallState::Retrying,
            CallState::Attempting,
            CallState::Succeeded,
        ]
    );
}

/// Validates that a hung attempt is cut off by the per-attempt deadline and
/// retried.
#[tokio::test(start_paused = true)]
async fn test_hung_attempt_is_retried_after_deadline() {
    let work = ScriptedWork::<u8, StatusError>::new()
        .then_delayed_ok(Duration::from_secs(3600), 0)
        .then_ok(9);
    let policy = RetryPolicy::builder()
        .max_attempts(3)
        .linear_backoff(Duration::from_millis(500))
        .attempt_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let outcome = RetryExecutor::new(policy).execute_with_outcome(|| work.call()).await;

    assert_eq!(work.calls(), 2);
    assert_eq!(
        outcome.attempts[0].outcome,
        AttemptOutcome::TimedOut { deadline: Duration::from_secs(2) }
    );
    assert_eq!(work.gaps(), vec![Duration::from_millis(2500)]);
    assert_eq!(outcome.into_result().unwrap(), 9);
}

/// Validates that an unmet precondition short-circuits to the fallback
/// without invoking work, whatever the mode.
#[tokio::test(start_paused = true)]
async fn test_unmet_precondition_never_invokes_work() {
    for mode in [FallbackMode::Absorb, FallbackMode::SurfaceUnavailable, FallbackMode::SurfaceAll]
    {
        let work = ScriptedWork::<&'static str, StatusError>::new().then_ok("live");

        let resolved = execute_with_fallback(
            Precondition::require(false, "GEMINI_API_KEY not configured"),
            || work.call(),
            Fallback::value("sample"),
            mode,
            &RetryExecutor::default(),
        )
        .await
        .unwrap();

        assert_eq!(work.calls(), 0);
        assert_eq!(resolved.value, "sample");
        assert!(matches!(resolved.source, FallbackSource::Precondition(_)));
    }
}

/// Validates fallback absorption after exhausted transient failures, and
/// that the fallback is produced only once retries are over.
#[tokio::test(start_paused = true)]
async fn test_fallback_after_exhausted_retries() {
    let work = ScriptedWork::<String, StatusError>::new().then_err(StatusError(503));
    let started = Instant::now();

    let resolved = execute_with_fallback(
        Precondition::Met,
        || work.call(),
        Fallback::lazy(|| "N/A".to_string()),
        FallbackMode::Absorb,
        &RetryExecutor::new(policy(3, 500)),
    )
    .await
    .unwrap();

    assert_eq!(work.calls(), 3);
    assert_eq!(started.elapsed(), Duration::from_millis(1500));
    assert_eq!(resolved.value, "N/A");
    assert_eq!(resolved.source, FallbackSource::Failure("upstream returned 503".to_string()));
}

/// Validates that two runs of always-succeeding work produce equal results.
#[tokio::test]
async fn test_repeated_success_is_idempotent() {
    let work = ScriptedWork::<u32, StatusError>::new().then_ok(42);
    let policy = RetryPolicy::default();

    let first = execute_with_retry(|| work.call(), &policy).await.unwrap();
    let second = execute_with_retry(|| work.call(), &policy).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(work.calls(), 2);
}
