//! Integration test utilities for the Lexi workspace
//!
//! Provides scripted operations and a recording observer so the tests under
//! `tests/` can drive the executor end to end and inspect every decision it
//! made.

use lexi_core::error::{ClassifiedError, RawFailure};
use lexi_core::retry::RetryObserver;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// An operation whose outcomes are fixed up front.
///
/// Each call pops the next scripted outcome; once the script runs out every
/// further call returns the fallback.
#[derive(Debug)]
pub struct ScriptedOperation<T> {
    script: Mutex<VecDeque<Result<T, RawFailure>>>,
    fallback: Result<T, RawFailure>,
    calls: AtomicU32,
}

impl<T: Clone> ScriptedOperation<T> {
    /// Operation returning `script` in order, then `fallback` forever.
    pub fn new(
        script: impl IntoIterator<Item = Result<T, RawFailure>>,
        fallback: Result<T, RawFailure>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback,
            calls: AtomicU32::new(0),
        }
    }

    /// Fails `failures` times with `code`, then returns `value`.
    pub fn failing_then(failures: u32, code: &str, value: T) -> Self {
        let script = (0..failures).map(|n| {
            Err(RawFailure::with_code(code).message(format!("scripted failure {}", n + 1)))
        });
        Self::new(script, Ok(value))
    }

    /// Fails with `code` on every call.
    pub fn always_failing(code: &str) -> Self {
        Self::new([], Err(RawFailure::with_code(code).message("scripted failure")))
    }

    /// Run one attempt.
    pub async fn call(&self) -> Result<T, RawFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = lock(&self.script).pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    /// Number of attempts made so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Observer that remembers everything it saw.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    retries: Mutex<Vec<(u32, Duration, String)>>,
    give_ups: Mutex<Vec<ClassifiedError>>,
    cancellations: Mutex<Vec<u32>>,
}

impl RecordingObserver {
    /// Delays announced before each retry, in order.
    pub fn delays(&self) -> Vec<Duration> {
        lock(&self.retries).iter().map(|(_, delay, _)| *delay).collect()
    }

    /// Codes of the failures that triggered each retry.
    pub fn retried_codes(&self) -> Vec<String> {
        lock(&self.retries).iter().map(|(_, _, code)| code.clone()).collect()
    }

    /// Errors handed back to the caller.
    pub fn give_ups(&self) -> Vec<ClassifiedError> {
        lock(&self.give_ups).clone()
    }

    /// Attempt counts at each cancellation.
    pub fn cancellations(&self) -> Vec<u32> {
        lock(&self.cancellations).clone()
    }
}

impl RetryObserver for RecordingObserver {
    fn on_retry(&self, retry: u32, delay: Duration, error: &ClassifiedError) {
        lock(&self.retries).push((retry, delay, error.code().to_string()));
    }

    fn on_give_up(&self, error: &ClassifiedError) {
        lock(&self.give_ups).push(error.clone());
    }

    fn on_cancelled(&self, attempts: u32) {
        lock(&self.cancellations).push(attempts);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_fallback() {
        let op = ScriptedOperation::failing_then(2, "unavailable", "ok");

        assert_eq!(op.call().await.unwrap_err().to_string(), "scripted failure 1");
        assert!(op.call().await.is_err());
        assert_eq!(op.call().await, Ok("ok"));
        assert_eq!(op.call().await, Ok("ok"));
        assert_eq!(op.calls(), 4);
    }
}
