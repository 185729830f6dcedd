//! Mapping arbitrary failures onto the error taxonomy.

use super::classified::{ClassifiedError, DEFAULT_RAW_MESSAGE};
use super::code::ErrorCode;
use super::failure::Failure;
use super::locale::Locale;

/// Classify a failure with English user-facing messages.
///
/// ```rust
/// use lexi_core::error::{classify, RawFailure};
///
/// let err = classify(&RawFailure::with_code("unavailable"));
/// assert!(err.is_retryable());
/// assert_eq!(err.localized_message(), "Service unavailable; please retry later.");
///
/// let err = classify(&RawFailure::with_code("not-found"));
/// assert!(!err.is_retryable());
/// ```
pub fn classify<F: Failure + ?Sized>(failure: &F) -> ClassifiedError {
    classify_with(failure, Locale::default())
}

/// Classify a failure, producing the localized message in `locale`.
pub fn classify_with<F: Failure + ?Sized>(failure: &F, locale: Locale) -> ClassifiedError {
    let message = failure.message().filter(|m| !m.is_empty());
    let code = resolve_code(failure.code(), message.as_deref());

    ClassifiedError::new(
        code,
        message.unwrap_or_else(|| DEFAULT_RAW_MESSAGE.to_string()),
        failure.status_code(),
        locale,
    )
}

/// Pick the code for a failure.
///
/// A non-empty explicit code always wins. Without one the message is searched
/// for hints; anything unmatched is `internal`.
pub fn resolve_code(code: Option<&str>, message: Option<&str>) -> ErrorCode {
    if let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) {
        return ErrorCode::parse(code);
    }

    message
        .and_then(code_from_message)
        .unwrap_or(ErrorCode::Internal)
}

// Best effort only: free text can mention these words for unrelated reasons.
// Matching ignores case, so "UNAUTHENTICATED" in a message is terminal too.
fn code_from_message(message: &str) -> Option<ErrorCode> {
    let message = message.to_lowercase();
    if message.contains("unauthenticated") {
        Some(ErrorCode::Unauthenticated)
    } else if message.contains("permission") {
        Some(ErrorCode::PermissionDenied)
    } else if message.contains("not found") {
        Some(ErrorCode::NotFound)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RawFailure;
    use rstest::rstest;

    #[test]
    fn test_classify_unavailable() {
        let err = classify(&RawFailure::with_code("unavailable"));
        assert_eq!(err.code(), "unavailable");
        assert!(err.is_retryable());
        assert_eq!(err.localized_message(), "Service unavailable; please retry later.");
    }

    #[test]
    fn test_classify_not_found() {
        let err = classify(&RawFailure::with_code("not-found"));
        assert!(!err.is_retryable());
        assert_eq!(err.localized_message(), "Requested resource not found.");
    }

    #[test]
    fn test_explicit_code_beats_message() {
        let failure = RawFailure::with_code("unavailable").message("permission cache not found");
        let err = classify(&failure);
        assert_eq!(err.code(), "unavailable");
        assert_eq!(err.raw_message(), "permission cache not found");
    }

    // Hints match regardless of case; a case-sensitive search would leave
    // the first row as a retryable `internal`.
    #[rstest]
    #[case("Request is UNAUTHENTICATED", "unauthenticated")]
    #[case("PERMISSION_DENIED: caller lacks role", "permission-denied")]
    #[case("Missing or insufficient permissions.", "permission-denied")]
    #[case("Document not found", "not-found")]
    #[case("socket hang up", "internal")]
    fn test_message_fallback(#[case] message: &str, #[case] expected: &str) {
        let err = classify(&RawFailure::with_message(message));
        assert_eq!(err.code(), expected);
    }

    #[test]
    fn test_empty_code_falls_back_to_message() {
        let failure = RawFailure::with_code("  ").message("user not found");
        assert_eq!(classify(&failure).code(), "not-found");
    }

    #[test]
    fn test_no_code_no_message() {
        let err = classify(&RawFailure::default().status_code(502));
        assert_eq!(err.code(), "internal");
        assert!(err.is_retryable());
        assert_eq!(err.raw_message(), DEFAULT_RAW_MESSAGE);
        assert_eq!(err.status_code(), Some(502));
    }

    #[test]
    fn test_unrecognized_code_is_transient() {
        let err = classify(&RawFailure::with_code("functions/resource-exhausted"));
        assert_eq!(err.code(), "resource-exhausted");
        assert!(err.is_retryable());
        assert_eq!(err.localized_message(), "An error occurred; please try again.");
    }

    #[test]
    fn test_classify_with_locale() {
        let err = classify_with(&RawFailure::with_code("functions/unavailable"), Locale::Vietnamese);
        assert_eq!(err.code(), "unavailable");
        assert_eq!(
            err.localized_message(),
            "Dịch vụ hiện không khả dụng. Vui lòng thử lại sau."
        );
    }

    #[test]
    fn test_reclassifying_is_idempotent() {
        let first = classify(&RawFailure::with_code("data-loss").message("lost").status_code(500));
        let second = classify(&first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_dyn_failure() {
        let failure: Box<dyn Failure> = Box::new(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "deadline",
        ));
        let err = classify(failure.as_ref());
        assert_eq!(err.code(), "timeout");
    }
}
