use super::policy::RetryPolicy;
use std::time::Duration;

/// Per-call retry bookkeeping.
///
/// Owned by exactly one executor invocation and dropped when it resolves.
/// `current_delay` only ever grows and never passes the policy's cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptState {
    attempt_number: u32,
    current_delay: Duration,
}

impl AttemptState {
    /// State before the first attempt.
    pub fn new(policy: &RetryPolicy) -> Self {
        Self {
            attempt_number: 0,
            current_delay: policy.initial_delay(),
        }
    }

    /// Zero-based index of the attempt in progress.
    pub fn attempt_number(&self) -> u32 {
        self.attempt_number
    }

    /// Delay to wait if the current attempt fails retryably.
    pub fn current_delay(&self) -> Duration {
        self.current_delay
    }

    /// Invocations made once the current attempt has run.
    pub fn attempts_made(&self) -> u32 {
        self.attempt_number + 1
    }

    /// Whether the current attempt is the last one the policy allows.
    pub fn is_exhausted(&self, policy: &RetryPolicy) -> bool {
        self.attempt_number >= policy.max_retries()
    }

    /// Move to the next attempt, returning the delay to wait before it.
    pub fn advance(&mut self, policy: &RetryPolicy) -> Duration {
        let wait = self.current_delay;
        self.current_delay = policy.grow(wait);
        self.attempt_number += 1;
        wait
    }
}
