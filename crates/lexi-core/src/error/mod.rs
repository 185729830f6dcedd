//! Error taxonomy for calls made through the executor.
//!
//! Any failure an operation reports is reduced to a [`ClassifiedError`]:
//!
//! - [`Failure`] - what the executor needs to know about a raw failure
//! - [`classify`] - pure mapping from a failure to the code table
//! - [`ErrorCode`] - the fixed code → (retryable, message) table
//! - [`Locale`] - language of the user-facing message
//! - [`error_boundary!`](crate::error_boundary) - `From` conversions between error types

mod boundary;
mod classified;
mod classify;
mod code;
mod failure;
mod locale;

pub use classified::{ClassifiedError, DEFAULT_RAW_MESSAGE};
pub use classify::{classify, classify_with, resolve_code};
pub use code::{ErrorCategory, ErrorCode};
pub use failure::{Failure, RawFailure};
pub use locale::{Locale, ParseLocaleError};
