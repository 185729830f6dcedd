use super::code::{ErrorCategory, ErrorCode};
use super::locale::Locale;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw message used when a failure carries no description of its own.
pub const DEFAULT_RAW_MESSAGE: &str = "An error occurred";

const CANCELLED_RAW_MESSAGE: &str = "operation cancelled by caller";

/// The uniform failure shape surfaced by the executor.
///
/// Combines the machine code, the raw message of the underlying failure, a
/// localized message suitable for the learner, and the retry decision that
/// was taken. Values are immutable once built.
///
/// Deserialization rebuilds the value from its code, so a body whose
/// `retryable` flag or localized message disagrees with the code table is
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {raw_message}")]
#[serde(rename_all = "camelCase", try_from = "ClassifiedErrorWire")]
pub struct ClassifiedError {
    code: ErrorCode,
    raw_message: String,
    localized_message: String,
    retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
    attempts: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassifiedErrorWire {
    code: ErrorCode,
    raw_message: String,
    localized_message: String,
    retryable: bool,
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default = "one")]
    attempts: u32,
}

fn one() -> u32 {
    1
}

impl TryFrom<ClassifiedErrorWire> for ClassifiedError {
    type Error = String;

    fn try_from(wire: ClassifiedErrorWire) -> Result<Self, Self::Error> {
        if wire.retryable != wire.code.is_retryable() {
            return Err(format!(
                "retryable = {} contradicts code {}",
                wire.retryable, wire.code
            ));
        }

        let locale = [Locale::English, Locale::Vietnamese]
            .into_iter()
            .find(|locale| wire.code.localized_message(*locale) == wire.localized_message)
            .ok_or_else(|| format!("localized message does not belong to code {}", wire.code))?;

        Ok(Self::new(wire.code, wire.raw_message, wire.status_code, locale)
            .with_attempts(wire.attempts))
    }
}

impl ClassifiedError {
    /// Build a classified error from an already resolved code.
    ///
    /// The retry flag and the localized message come from the code table.
    pub fn new(
        code: ErrorCode,
        raw_message: impl Into<String>,
        status_code: Option<u16>,
        locale: Locale,
    ) -> Self {
        let raw_message = raw_message.into();
        Self {
            retryable: code.is_retryable(),
            localized_message: code.localized_message(locale).to_string(),
            raw_message: if raw_message.is_empty() {
                DEFAULT_RAW_MESSAGE.to_string()
            } else {
                raw_message
            },
            code,
            status_code,
            attempts: 1,
        }
    }

    /// The error reported when the caller abandons a call.
    pub fn cancelled(attempts: u32, locale: Locale) -> Self {
        Self::new(ErrorCode::Cancelled, CANCELLED_RAW_MESSAGE, None, locale).with_attempts(attempts)
    }

    pub(crate) fn with_attempts(self, attempts: u32) -> Self {
        Self { attempts, ..self }
    }

    /// Canonical code string (`unavailable`, `permission-denied`, ...).
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Parsed code.
    pub fn error_code(&self) -> &ErrorCode {
        &self.code
    }

    /// Message of the underlying failure.
    pub fn raw_message(&self) -> &str {
        &self.raw_message
    }

    /// Message to show the learner.
    pub fn localized_message(&self) -> &str {
        &self.localized_message
    }

    /// Whether the failure was eligible for another attempt.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Transport status code of the underlying failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// How many times the operation was invoked before this error surfaced.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Taxonomy bucket of the code.
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Whether the calling layer should send the learner back to sign-in.
    pub fn requires_reauthentication(&self) -> bool {
        self.code == ErrorCode::Unauthenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_from_table() {
        let err = ClassifiedError::new(ErrorCode::Unavailable, "503 from proxy", Some(503), Locale::English);
        assert_eq!(err.code(), "unavailable");
        assert!(err.is_retryable());
        assert_eq!(err.localized_message(), "Service unavailable; please retry later.");
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.attempts(), 1);
        assert_eq!(err.to_string(), "unavailable: 503 from proxy");
    }

    #[test]
    fn test_empty_raw_message_defaults() {
        let err = ClassifiedError::new(ErrorCode::Internal, "", None, Locale::English);
        assert_eq!(err.raw_message(), DEFAULT_RAW_MESSAGE);
    }

    #[test]
    fn test_cancelled() {
        let err = ClassifiedError::cancelled(2, Locale::Vietnamese);
        assert_eq!(err.code(), "cancelled");
        assert!(!err.is_retryable());
        assert_eq!(err.attempts(), 2);
        assert_eq!(err.localized_message(), "Yêu cầu đã bị hủy.");
        assert_eq!(err.category(), ErrorCategory::Cancelled);
    }

    #[test]
    fn test_requires_reauthentication() {
        let auth = ClassifiedError::new(ErrorCode::Unauthenticated, "token expired", Some(401), Locale::English);
        assert!(auth.requires_reauthentication());

        let denied = ClassifiedError::new(ErrorCode::PermissionDenied, "nope", Some(403), Locale::English);
        assert!(!denied.requires_reauthentication());
        assert_eq!(denied.category(), ErrorCategory::Auth);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ClassifiedError::new(ErrorCode::NotFound, "no session", None, Locale::English)
            .with_attempts(1);
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "not-found");
        assert_eq!(json["rawMessage"], "no session");
        assert_eq!(json["localizedMessage"], "Requested resource not found.");
        assert_eq!(json["retryable"], false);
        assert!(json.get("statusCode").is_none());

        let back: ClassifiedError = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_vietnamese_reads_back() {
        let err = ClassifiedError::new(ErrorCode::Timeout, "slow", Some(504), Locale::Vietnamese)
            .with_attempts(3);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(serde_json::from_str::<ClassifiedError>(&json).unwrap(), err);
    }

    #[test]
    fn test_contradictory_retryable_is_rejected() {
        let body = serde_json::json!({
            "code": "unauthenticated",
            "rawMessage": "token expired",
            "localizedMessage": "Not authenticated; please sign in again.",
            "retryable": true
        });
        assert!(serde_json::from_value::<ClassifiedError>(body).is_err());
    }

    #[test]
    fn test_foreign_localized_message_is_rejected() {
        let body = serde_json::json!({
            "code": "internal",
            "rawMessage": "boom",
            "localizedMessage": "Try turning it off and on again.",
            "retryable": true
        });
        assert!(serde_json::from_value::<ClassifiedError>(body).is_err());
    }

    #[test]
    fn test_missing_attempts_defaults_to_one() {
        let body = serde_json::json!({
            "code": "unavailable",
            "rawMessage": "restarting",
            "localizedMessage": "Service unavailable; please retry later.",
            "retryable": true,
            "statusCode": 503
        });
        let err: ClassifiedError = serde_json::from_value(body).unwrap();
        assert_eq!(err.attempts(), 1);
        assert_eq!(err.status_code(), Some(503));
    }
}
