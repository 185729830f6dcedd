//! The seam between callers and retry implementations.

use super::state::AttemptState;
use crate::error::{ClassifiedError, Failure};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// A strategy for retrying failed operations with backoff.
///
/// Implementations decide when to retry, how long to wait between attempts,
/// and when to give up. Whatever they decide, a failed call always ends in a
/// [`ClassifiedError`], never in the operation's own error type.
///
/// # Examples
///
/// ```rust
/// use lexi_core::error::RawFailure;
/// use lexi_core::retry::{BackoffStrategy, RetryExecutor, RetryPolicy};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), lexi_core::error::ClassifiedError> {
/// let policy = RetryPolicy::builder()
///     .max_retries(3)
///     .initial_delay(Duration::from_millis(10))
///     .build()
///     .expect("valid policy");
/// let executor = RetryExecutor::new(policy);
///
/// let calls = Arc::new(AtomicU32::new(0));
/// let reply = executor.execute(|| {
///     let calls = Arc::clone(&calls);
///     async move {
///         if calls.fetch_add(1, Ordering::SeqCst) < 2 {
///             Err(RawFailure::with_code("unavailable"))
///         } else {
///             Ok("ok")
///         }
///     }
/// }).await?;
/// assert_eq!(reply, "ok");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait BackoffStrategy: Send + Sync {
    /// Execute an operation with retry logic.
    ///
    /// The operation is called repeatedly until it succeeds, a non-retryable
    /// error occurs, or the retry budget is spent.
    ///
    /// # Returns
    /// - `Ok(T)`: the successful result
    /// - `Err(ClassifiedError)`: the classified final failure
    async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, ClassifiedError>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: Failure + Send + Sync + 'static;

    /// Determine if a classified failure may be retried.
    ///
    /// Default implementation follows the error's own retry flag. Override to
    /// narrow retries further; widening them to terminal codes is a misuse.
    fn should_retry(&self, error: &ClassifiedError, attempt: u32) -> bool {
        let _ = attempt;
        error.is_retryable()
    }

    /// Delay before the next attempt, or `None` when the budget is spent.
    ///
    /// Called after a failure and before sleeping.
    fn next_delay(&self, state: &AttemptState) -> Option<Duration>;

    /// Maximum number of retries after the initial attempt.
    ///
    /// With `max_retries() == 3` an operation runs at most 4 times.
    fn max_retries(&self) -> u32;
}
