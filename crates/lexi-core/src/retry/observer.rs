//! Hooks for watching retry decisions.
//!
//! Observers are explicitly constructed and handed to a [`RetryExecutor`];
//! the executor holds no process-wide state. They see every decision but
//! cannot change one.
//!
//! [`RetryExecutor`]: super::RetryExecutor

use crate::error::ClassifiedError;
use std::time::Duration;
use tracing::{debug, warn};

/// Receives notifications about retries, give-ups, and cancellations.
///
/// All methods default to doing nothing.
pub trait RetryObserver: Send + Sync {
    /// A retryable failure happened; retry number `retry` starts after `delay`.
    fn on_retry(&self, retry: u32, delay: Duration, error: &ClassifiedError) {
        let _ = (retry, delay, error);
    }

    /// The executor stopped and is returning `error` to the caller.
    fn on_give_up(&self, error: &ClassifiedError) {
        let _ = error;
    }

    /// The caller cancelled after `attempts` invocations.
    fn on_cancelled(&self, attempts: u32) {
        let _ = attempts;
    }
}

/// Default observer: reports through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RetryObserver for TracingObserver {
    fn on_retry(&self, retry: u32, delay: Duration, error: &ClassifiedError) {
        debug!(
            retry,
            delay_ms = delay.as_millis() as u64,
            code = error.code(),
            "attempt failed: {}; retrying",
            error.raw_message()
        );
    }

    fn on_give_up(&self, error: &ClassifiedError) {
        warn!(
            attempts = error.attempts(),
            code = error.code(),
            retryable = error.is_retryable(),
            status = error.status_code(),
            "giving up: {}",
            error.raw_message()
        );
    }

    fn on_cancelled(&self, attempts: u32) {
        debug!(attempts, "call cancelled by caller");
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RetryObserver for NoopObserver {}
