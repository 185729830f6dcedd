//! The error-like values the executor accepts from operations.

use super::ClassifiedError;
use std::io;
use thiserror::Error;

/// An error-like value produced by a failed operation.
///
/// Classification only needs three optional facts about a failure: an
/// explicit code, a human-readable message, and an HTTP-style status code.
/// Implement this for the error type of any operation handed to the executor.
pub trait Failure {
    /// Explicit error code, if the failure carries one.
    fn code(&self) -> Option<&str> {
        None
    }

    /// Free-text description of the failure.
    fn message(&self) -> Option<String>;

    /// Transport status code, if the failure came from an HTTP exchange.
    fn status_code(&self) -> Option<u16> {
        None
    }
}

/// A plain failure record with the three optional fields.
///
/// Useful for adapting foreign error shapes and for tests.
///
/// ```rust
/// use lexi_core::error::{Failure, RawFailure};
///
/// let failure = RawFailure::with_code("unavailable")
///     .message("backend restarting")
///     .status_code(503);
/// assert_eq!(failure.code(), Some("unavailable"));
/// assert_eq!(Failure::status_code(&failure), Some(503));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.message.as_deref().or(self.code.as_deref()).unwrap_or("unknown failure"))]
pub struct RawFailure {
    code: Option<String>,
    message: Option<String>,
    status_code: Option<u16>,
}

impl RawFailure {
    /// A failure with an explicit code.
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    /// A failure that only carries a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Set the message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the status code.
    pub fn status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

impl Failure for RawFailure {
    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn message(&self) -> Option<String> {
        self.message.clone()
    }

    fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

impl Failure for ClassifiedError {
    fn code(&self) -> Option<&str> {
        Some(self.error_code().as_str())
    }

    fn message(&self) -> Option<String> {
        Some(self.raw_message().to_string())
    }

    fn status_code(&self) -> Option<u16> {
        ClassifiedError::status_code(self)
    }
}

impl Failure for io::Error {
    fn code(&self) -> Option<&str> {
        match self.kind() {
            io::ErrorKind::TimedOut => Some("timeout"),
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => Some("network-error"),
            io::ErrorKind::NotFound => Some("not-found"),
            io::ErrorKind::PermissionDenied => Some("permission-denied"),
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => Some("invalid-argument"),
            _ => None,
        }
    }

    fn message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Failure for anyhow::Error {
    fn code(&self) -> Option<&str> {
        if let Some(raw) = self.downcast_ref::<RawFailure>() {
            return raw.code();
        }
        if let Some(classified) = self.downcast_ref::<ClassifiedError>() {
            return Failure::code(classified);
        }
        self.downcast_ref::<io::Error>().and_then(Failure::code)
    }

    fn message(&self) -> Option<String> {
        if let Some(raw) = self.downcast_ref::<RawFailure>() {
            return raw.message.clone();
        }
        Some(self.to_string())
    }

    fn status_code(&self) -> Option<u16> {
        if let Some(raw) = self.downcast_ref::<RawFailure>() {
            return raw.status_code;
        }
        self.downcast_ref::<ClassifiedError>()
            .and_then(ClassifiedError::status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_failure_display() {
        assert_eq!(RawFailure::with_message("boom").to_string(), "boom");
        assert_eq!(RawFailure::with_code("internal").to_string(), "internal");
        assert_eq!(RawFailure::default().to_string(), "unknown failure");
    }

    #[test]
    fn test_io_error_codes() {
        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "read timed out");
        assert_eq!(Failure::code(&timed_out), Some("timeout"));

        let reset = io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer");
        assert_eq!(Failure::code(&reset), Some("network-error"));

        let other = io::Error::other("something odd");
        assert_eq!(Failure::code(&other), None);
        assert_eq!(Failure::message(&other).as_deref(), Some("something odd"));
    }

    #[test]
    fn test_anyhow_downcasts() {
        let err = anyhow::Error::new(RawFailure::with_code("data-loss").status_code(500));
        assert_eq!(Failure::code(&err), Some("data-loss"));
        assert_eq!(Failure::status_code(&err), Some(500));
        assert_eq!(Failure::message(&err), None);

        let err = anyhow::Error::new(io::Error::new(io::ErrorKind::NotFound, "no such doc"));
        assert_eq!(Failure::code(&err), Some("not-found"));

        let err = anyhow::anyhow!("permission missing for collection");
        assert_eq!(Failure::code(&err), None);
        assert_eq!(
            Failure::message(&err).as_deref(),
            Some("permission missing for collection")
        );
    }
}
