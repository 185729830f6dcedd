#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Resilient call execution for the Lexi tutor.
//!
//! Every call the Lexi client makes to its backend functions goes through a
//! single retry component. This crate provides it:
//!
//! - **Retry executor** via [`RetryExecutor`] and the [`BackoffStrategy`] trait
//!   - Exponential backoff capped at a maximum delay
//!   - Retryable vs. terminal classification of every failure
//!   - Cooperative cancellation through a `CancellationToken`
//! - **Error taxonomy** via [`classify`] and [`ClassifiedError`]
//!   - Fixed code table (`unauthenticated`, `unavailable`, ...)
//!   - Localized user-facing messages (English, Vietnamese)
//! - **Observer hooks** via [`RetryObserver`], injected per executor
//! - **Configuration** via [`ExecutorConfig`] (TOML and environment)
//!
//! # Examples
//!
//! ```rust
//! use lexi_core::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), ClassifiedError> {
//! let policy = RetryPolicy::builder()
//!     .max_retries(2)
//!     .initial_delay(Duration::from_millis(100))
//!     .build()
//!     .expect("valid policy");
//!
//! let executor = RetryExecutor::new(policy);
//! let reply = executor
//!     .execute(|| async { Ok::<_, RawFailure>("xin chào") })
//!     .await?;
//! assert_eq!(reply, "xin chào");
//! # Ok(())
//! # }
//! ```
//!
//! [`RetryExecutor`]: retry::RetryExecutor
//! [`BackoffStrategy`]: retry::BackoffStrategy
//! [`RetryObserver`]: retry::RetryObserver
//! [`classify`]: error::classify
//! [`ClassifiedError`]: error::ClassifiedError
//! [`ExecutorConfig`]: config::ExecutorConfig

pub mod config;
pub mod error;
pub mod retry;

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use lexi_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigError, ExecutorConfig};
    pub use crate::error::{
        ClassifiedError, ErrorCategory, ErrorCode, Failure, Locale, RawFailure, classify,
        classify_with,
    };
    pub use crate::error_boundary;
    pub use crate::retry::{
        AttemptState, BackoffStrategy, NoopObserver, PolicyError, RetryExecutor, RetryObserver,
        RetryPolicy, RetryPolicyBuilder, TracingObserver, retry_with_backoff, retry_with_policy,
    };
}
