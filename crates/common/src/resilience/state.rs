//! Per-call state machine for orchestrated remote calls.
//!
//! ```text
//! Idle → Attempting → { Succeeded | Retrying → Attempting | Failed }
//! ```
//!
//! `Succeeded` and `Failed` are terminal. The executor drives one machine per
//! logical call and exposes its history on the outcome for inspection.

use std::fmt;

use thiserror::Error;

/// State of a single orchestrated call sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallState {
    /// Created, no attempt started yet.
    Idle,
    /// An attempt is in flight.
    Attempting,
    /// The last attempt failed transiently; waiting out the backoff.
    Retrying,
    /// The call produced a value.
    Succeeded,
    /// The call gave up (error propagated or fallback substituted).
    Failed,
}

impl CallState {
    /// Whether no further transitions are allowed.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Attempting)
                | (Self::Attempting, Self::Succeeded)
                | (Self::Attempting, Self::Retrying)
                | (Self::Attempting, Self::Failed)
                | (Self::Retrying, Self::Attempting)
        )
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Attempting => "attempting",
            Self::Retrying => "retrying",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Rejected state transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid call state transition from {from} to {to}")]
pub struct CallStateError {
    pub from: CallState,
    pub to: CallState,
}

/// Tracks the current state and the full history of one call sequence.
#[derive(Debug, Clone)]
pub struct CallStateMachine {
    current: CallState,
    history: Vec<CallState>,
}

impl Default for CallStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CallStateMachine {
    pub fn new() -> Self {
        Self { current: CallState::Idle, history: vec![CallState::Idle] }
    }

    pub fn current(&self) -> CallState {
        self.current
    }

    /// Every state visited so far, starting with `Idle`.
    pub fn history(&self) -> &[CallState] {
        &self.history
    }

    /// Move to `next`, rejecting transitions the state diagram does not allow.
    pub fn transition(&mut self, next: CallState) -> Result<(), CallStateError> {
        if !self.current.can_transition_to(next) {
            return Err(CallStateError { from: self.current, to: next });
        }
        self.current = next;
        self.history.push(next);
        Ok(())
    }

    pub fn into_history(self) -> Vec<CallState> {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_history() {
        let mut machine = CallStateMachine::new();
        machine.transition(CallState::Attempting).unwrap();
        machine.transition(CallState::Retrying).unwrap();
        machine.transition(CallState::Attempting).unwrap();
        machine.transition(CallState::Succeeded).unwrap();

        assert_eq!(machine.current(), CallState::Succeeded);
        assert_eq!(
            machine.history(),
            &[
                CallState::Idle,
                CallState::Attempting,
                CallState::Retrying,
                CallState::Attempting,
                CallState::Succeeded,
            ]
        );
    }

    #[test]
    fn test_retrying_only_reachable_from_attempting() {
        let mut machine = CallStateMachine::new();
        let err = machine.transition(CallState::Retrying).unwrap_err();
        assert_eq!(err, CallStateError { from: CallState::Idle, to: CallState::Retrying });
        assert_eq!(machine.current(), CallState::Idle);
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut machine = CallStateMachine::new();
        machine.transition(CallState::Attempting).unwrap();
        machine.transition(CallState::Failed).unwrap();

        assert!(machine.current().is_terminal());
        assert!(machine.transition(CallState::Attempting).is_err());
        assert!(machine.transition(CallState::Succeeded).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = CallStateError { from: CallState::Succeeded, to: CallState::Retrying };
        assert_eq!(err.to_string(), "invalid call state transition from succeeded to retrying");
    }
}
