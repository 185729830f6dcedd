//! Retry policy: how many attempts and how the delay between them grows.

use super::state::AttemptState;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);
const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(30_000);
const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

/// Reasons a retry policy is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    /// The first delay must be positive.
    #[error("initial delay must be greater than zero")]
    ZeroInitialDelay,

    /// The cap must not be below the first delay.
    #[error("max delay ({max:?}) must be at least the initial delay ({initial:?})")]
    MaxBelowInitial {
        /// Configured initial delay.
        initial: Duration,
        /// Configured max delay.
        max: Duration,
    },

    /// The multiplier must be a finite number greater than one.
    #[error("backoff multiplier must be a finite number greater than 1, got {0}")]
    InvalidMultiplier(f64),
}

/// Immutable retry configuration.
///
/// After a retryable failure the executor waits `current_delay`, then grows it
/// to `min(current_delay * backoff_multiplier, max_delay)`. The operation is
/// invoked at most `max_retries + 1` times.
///
/// # Examples
///
/// ```rust
/// use lexi_core::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// let delays: Vec<_> = policy.delays().collect();
/// assert_eq!(
///     delays,
///     vec![
///         Duration::from_millis(1000),
///         Duration::from_millis(2000),
///         Duration::from_millis(4000),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolicySettings", into = "PolicySettings")]
pub struct RetryPolicy {
    max_retries: u32,
    initial_delay: Duration,
    max_delay: Duration,
    backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Create a validated policy.
    pub fn new(
        max_retries: u32,
        initial_delay: Duration,
        max_delay: Duration,
        backoff_multiplier: f64,
    ) -> Result<Self, PolicyError> {
        if initial_delay.is_zero() {
            return Err(PolicyError::ZeroInitialDelay);
        }
        if max_delay < initial_delay {
            return Err(PolicyError::MaxBelowInitial {
                initial: initial_delay,
                max: max_delay,
            });
        }
        if !backoff_multiplier.is_finite() || backoff_multiplier <= 1.0 {
            return Err(PolicyError::InvalidMultiplier(backoff_multiplier));
        }

        Ok(Self {
            max_retries,
            initial_delay,
            max_delay,
            backoff_multiplier,
        })
    }

    /// Create a new builder for configuring a policy.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Retries allowed after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before the first retry.
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Upper bound on any single delay.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Growth factor applied after every retryable failure.
    pub fn backoff_multiplier(&self) -> f64 {
        self.backoff_multiplier
    }

    /// Total attempts the policy allows, the first one included.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// The delay that follows `current`: multiplied, then capped.
    ///
    /// Computed on nanoseconds so that whole-millisecond schedules stay exact.
    pub fn grow(&self, current: Duration) -> Duration {
        let cap = self.max_delay.as_nanos() as f64;
        let next = current.as_nanos() as f64 * self.backoff_multiplier;
        if next >= cap {
            self.max_delay
        } else {
            Duration::from_nanos(next as u64)
        }
    }

    /// The full schedule of inter-attempt delays, one per allowed retry.
    pub fn delays(&self) -> Delays<'_> {
        Delays {
            policy: self,
            state: AttemptState::new(self),
        }
    }
}

impl Default for RetryPolicy {
    /// `max_retries = 3`, `initial_delay = 1s`, `max_delay = 30s`, `backoff_multiplier = 2`.
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

/// Iterator over a policy's delay schedule. See [`RetryPolicy::delays`].
#[derive(Debug, Clone)]
pub struct Delays<'a> {
    policy: &'a RetryPolicy,
    state: AttemptState,
}

impl Iterator for Delays<'_> {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.state.is_exhausted(self.policy) {
            return None;
        }
        Some(self.state.advance(self.policy))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self
            .policy
            .max_retries
            .saturating_sub(self.state.attempt_number()) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Delays<'_> {}

/// Builder for [`RetryPolicy`]. Unset fields take the defaults.
///
/// ```rust
/// use lexi_core::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::builder()
///     .max_retries(2)
///     .initial_delay(Duration::from_millis(100))
///     .max_delay(Duration::from_secs(1))
///     .backoff_multiplier(2.0)
///     .build()
///     .unwrap();
/// assert_eq!(policy.max_attempts(), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RetryPolicyBuilder {
    max_retries: Option<u32>,
    initial_delay: Option<Duration>,
    max_delay: Option<Duration>,
    backoff_multiplier: Option<f64>,
}

impl RetryPolicyBuilder {
    /// Set the number of retries after the first attempt.
    ///
    /// Default: 3
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Set the delay before the first retry.
    ///
    /// Default: 1s
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Set the delay cap.
    ///
    /// Default: 30s
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = Some(delay);
        self
    }

    /// Set the growth factor.
    ///
    /// Default: 2.0
    pub fn backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = Some(multiplier);
        self
    }

    /// Validate and build the policy.
    pub fn build(self) -> Result<RetryPolicy, PolicyError> {
        RetryPolicy::new(
            self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            self.initial_delay.unwrap_or(DEFAULT_INITIAL_DELAY),
            self.max_delay.unwrap_or(DEFAULT_MAX_DELAY),
            self.backoff_multiplier.unwrap_or(DEFAULT_BACKOFF_MULTIPLIER),
        )
    }
}

/// Unvalidated form of a policy, with durations in milliseconds.
///
/// This is what configuration files and environment variables are read into;
/// converting it into a [`RetryPolicy`] applies the validation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicySettings {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Delay cap, in milliseconds.
    pub max_delay_ms: u64,
    /// Growth factor.
    pub backoff_multiplier: f64,
}

impl Default for PolicySettings {
    fn default() -> Self {
        RetryPolicy::default().into()
    }
}

impl TryFrom<PolicySettings> for RetryPolicy {
    type Error = PolicyError;

    fn try_from(settings: PolicySettings) -> Result<Self, Self::Error> {
        RetryPolicy::new(
            settings.max_retries,
            Duration::from_millis(settings.initial_delay_ms),
            Duration::from_millis(settings.max_delay_ms),
            settings.backoff_multiplier,
        )
    }
}

impl From<RetryPolicy> for PolicySettings {
    fn from(policy: RetryPolicy) -> Self {
        Self {
            max_retries: policy.max_retries,
            initial_delay_ms: whole_millis(policy.initial_delay),
            max_delay_ms: whole_millis(policy.max_delay),
            backoff_multiplier: policy.backoff_multiplier,
        }
    }
}

/// Milliseconds rounded up, so a positive delay never becomes zero.
fn whole_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
}
