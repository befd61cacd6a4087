//! Scripted units of work.
//!
//! [`ScriptedWork`] hands out one scripted step per invocation. Once the
//! script runs out, the last step repeats. Each invocation records the tokio
//! clock reading at the moment it started, so tests running on a paused clock
//! can assert exact backoff spacing.

#![allow(clippy::missing_panics_doc)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// One scripted response.
#[derive(Debug, Clone)]
pub enum ScriptedStep<T, E> {
    /// Resolve immediately with the result.
    Respond(Result<T, E>),
    /// Sleep for the duration, then resolve with the result.
    Delayed(Duration, Result<T, E>),
}

#[derive(Debug)]
struct Script<T, E> {
    steps: VecDeque<ScriptedStep<T, E>>,
    last: Option<ScriptedStep<T, E>>,
    started: Vec<Instant>,
}

/// Cloneable handle to a scripted unit of work.
///
/// Clones share the same script and counters.
#[derive(Debug, Clone)]
pub struct ScriptedWork<T, E> {
    script: Arc<Mutex<Script<T, E>>>,
    calls: Arc<AtomicU32>,
}

impl<T, E> Default for ScriptedWork<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> ScriptedWork<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                steps: VecDeque::new(),
                last: None,
                started: Vec::new(),
            })),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Append a step to the script.
    pub fn then(self, step: ScriptedStep<T, E>) -> Self {
        self.lock().steps.push_back(step);
        self
    }

    pub fn then_ok(self, value: T) -> Self {
        self.then(ScriptedStep::Respond(Ok(value)))
    }

    pub fn then_err(self, error: E) -> Self {
        self.then(ScriptedStep::Respond(Err(error)))
    }

    /// Append `count` copies of the same failure.
    pub fn then_err_times(mut self, error: E, count: usize) -> Self {
        for _ in 0..count {
            self = self.then_err(error.clone());
        }
        self
    }

    /// Respond with `value` only after `delay` has elapsed.
    pub fn then_delayed_ok(self, delay: Duration, value: T) -> Self {
        self.then(ScriptedStep::Delayed(delay, Ok(value)))
    }

    /// Number of invocations so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Clock readings at the start of each invocation.
    pub fn started_at(&self) -> Vec<Instant> {
        self.lock().started.clone()
    }

    /// Gaps between consecutive invocation starts.
    pub fn gaps(&self) -> Vec<Duration> {
        self.started_at().windows(2).map(|pair| pair[1].duration_since(pair[0])).collect()
    }

    /// Invoke the work once. Suitable as the body of an executor closure:
    /// `|| work.call()`.
    pub fn call(&self) -> impl Future<Output = Result<T, E>> + Send + 'static {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = {
            let mut script = self.lock();
            script.started.push(Instant::now());
            match script.steps.pop_front() {
                Some(step) => {
                    script.last = Some(step.clone());
                    Some(step)
                }
                None => script.last.clone(),
            }
        };

        async move {
            match step {
                Some(ScriptedStep::Respond(result)) => result,
                Some(ScriptedStep::Delayed(delay, result)) => {
                    tokio::time::sleep(delay).await;
                    result
                }
                None => panic!("ScriptedWork invoked with an empty script"),
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script<T, E>> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
