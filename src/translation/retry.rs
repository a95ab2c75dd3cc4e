/*!
 * Retry policy and per-call state machine.
 *
 * A remote call moves through
 * `Pending -> (Sent -> WaitingResponse -> Success | TransientFailure)* -> Success | Failed`.
 * The machine is pure bookkeeping; the client drives it and does the
 * actual sleeping and I/O.
 */

use std::time::Duration;

use crate::errors::{ProviderError, ServiceError};

/// Bounded exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first one included
    pub max_attempts: u32,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(1000),
            max_backoff: Duration::from_millis(30_000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_backoff,
            max_backoff,
        }
    }

    /// Backoff after the failed attempt number `attempt` (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(31);
        self.base_backoff
            .saturating_mul(1u32 << shift)
            .min(self.max_backoff)
    }
}

/// Observable state of one call
#[derive(Debug, Clone, PartialEq)]
pub enum CallState {
    Pending,
    Sent { attempt: u32 },
    WaitingResponse { attempt: u32 },
    TransientFailure { attempt: u32, error: ProviderError },
    Success { attempts: u32 },
    Failed(ServiceError),
}

impl CallState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Failed(_))
    }
}

/// Drives one call through its states under a `RetryPolicy`
#[derive(Debug, Clone)]
pub struct RetryMachine {
    policy: RetryPolicy,
    attempt: u32,
    state: CallState,
}

impl RetryMachine {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempt: 0,
            state: CallState::Pending,
        }
    }

    pub fn state(&self) -> &CallState {
        &self.state
    }

    /// Attempts started so far
    pub fn attempts(&self) -> u32 {
        self.attempt
    }

    /// Start the next attempt. Returns its 1-based number.
    pub fn begin_attempt(&mut self) -> u32 {
        debug_assert!(!self.state.is_terminal());
        self.attempt += 1;
        self.state = CallState::Sent {
            attempt: self.attempt,
        };
        self.attempt
    }

    /// The request left; now waiting for the reply
    pub fn on_sent(&mut self) {
        self.state = CallState::WaitingResponse {
            attempt: self.attempt,
        };
    }

    pub fn on_success(&mut self) {
        self.state = CallState::Success {
            attempts: self.attempt,
        };
    }

    /// Record a failed attempt
    ///
    /// Returns the backoff to sleep before retrying, or `None` when the call
    /// is over. In that case the state is `Failed` and `into_error` yields
    /// the service error.
    pub fn on_failure(&mut self, error: ProviderError) -> Option<Duration> {
        if error.is_transient() && self.attempt < self.policy.max_attempts {
            let backoff = self.policy.backoff_for(self.attempt);
            self.state = CallState::TransientFailure {
                attempt: self.attempt,
                error,
            };
            return Some(backoff);
        }

        self.state = CallState::Failed(ServiceError {
            attempts: self.attempt,
            source: error,
        });
        None
    }

    /// The terminal service error, if the call failed
    pub fn into_error(self) -> Option<ServiceError> {
        match self.state {
            CallState::Failed(error) => Some(error),
            _ => None,
        }
    }
}
