//! Retry policy, per-call state, and the executor that applies them.
//!
//! Every backend call the client makes is wrapped by a [`RetryExecutor`]:
//! retryable failures are attempted again after an exponentially growing
//! delay, terminal failures surface immediately, and every failure that
//! reaches the caller is a [`ClassifiedError`].
//!
//! # Key Types
//!
//! - [`RetryPolicy`] - Validated backoff parameters
//! - [`AttemptState`] - Per-call attempt counter and next delay
//! - [`BackoffStrategy`] - Core trait for retry strategies
//! - [`RetryExecutor`] - The policy-driven strategy, with cancellation
//! - [`RetryObserver`] - Hooks for retries, give-ups, and cancellations
//!
//! # Examples
//!
//! ```rust
//! use lexi_core::error::RawFailure;
//! use lexi_core::retry::{RetryPolicy, retry_with_policy};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), lexi_core::error::ClassifiedError> {
//! let policy = RetryPolicy::builder()
//!     .max_retries(3)
//!     .initial_delay(Duration::from_millis(100))
//!     .build()
//!     .expect("valid policy");
//!
//! let result = retry_with_policy(policy, || async {
//!     Ok::<_, RawFailure>(42)
//! }).await?;
//! assert_eq!(result, 42);
//! # Ok(())
//! # }
//! ```
//!
//! [`ClassifiedError`]: crate::error::ClassifiedError

mod executor;
mod observer;
mod policy;
mod state;
mod strategy;

pub use executor::{RetryExecutor, retry_with_backoff, retry_with_policy};
pub use observer::{NoopObserver, RetryObserver, TracingObserver};
pub use policy::{Delays, PolicyError, PolicySettings, RetryPolicy, RetryPolicyBuilder};
pub use state::AttemptState;
pub use strategy::BackoffStrategy;
