//! Error codes and the fixed code → policy table.

use super::locale::Locale;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Prefix the backend-function client SDK puts in front of callable error codes.
const FUNCTIONS_PREFIX: &str = "functions/";

/// Machine-readable error code of a failed call.
///
/// Codes follow the callable-function vocabulary (`unauthenticated`,
/// `unavailable`, ...). Anything outside the table is kept verbatim in
/// [`ErrorCode::Unrecognized`] and treated as transient.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Caller is not signed in or the token expired.
    Unauthenticated,
    /// Caller is signed in but lacks access.
    PermissionDenied,
    /// Requested resource does not exist.
    NotFound,
    /// Request was malformed.
    InvalidArgument,
    /// Backend deadline elapsed.
    DeadlineExceeded,
    /// Backend failed internally.
    Internal,
    /// Backend is temporarily unreachable or overloaded.
    Unavailable,
    /// Backend reported unrecoverable data loss.
    DataLoss,
    /// Transport failed before reaching the backend.
    NetworkError,
    /// Client-side timeout.
    Timeout,
    /// The caller abandoned the call.
    Cancelled,
    /// Any code outside the table.
    Unrecognized(String),
}

/// Coarse taxonomy of [`ErrorCode`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Authentication or authorization; the caller should re-authenticate.
    Auth,
    /// User-correctable input problems.
    ClientInput,
    /// Server-side or transport problems worth retrying.
    Transient,
    /// The call was abandoned by its caller.
    Cancelled,
}

impl ErrorCode {
    /// Parse a code string, ignoring surrounding whitespace and a leading
    /// `functions/` prefix.
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        let code = code.strip_prefix(FUNCTIONS_PREFIX).unwrap_or(code);
        match code {
            "unauthenticated" => Self::Unauthenticated,
            "permission-denied" => Self::PermissionDenied,
            "not-found" => Self::NotFound,
            "invalid-argument" => Self::InvalidArgument,
            "deadline-exceeded" => Self::DeadlineExceeded,
            "internal" => Self::Internal,
            "unavailable" => Self::Unavailable,
            "data-loss" => Self::DataLoss,
            "network-error" => Self::NetworkError,
            "timeout" => Self::Timeout,
            "cancelled" => Self::Cancelled,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The canonical code string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::PermissionDenied => "permission-denied",
            Self::NotFound => "not-found",
            Self::InvalidArgument => "invalid-argument",
            Self::DeadlineExceeded => "deadline-exceeded",
            Self::Internal => "internal",
            Self::Unavailable => "unavailable",
            Self::DataLoss => "data-loss",
            Self::NetworkError => "network-error",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::Unrecognized(code) => code,
        }
    }

    /// Which part of the taxonomy this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthenticated | Self::PermissionDenied => ErrorCategory::Auth,
            Self::NotFound | Self::InvalidArgument => ErrorCategory::ClientInput,
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::DeadlineExceeded
            | Self::Internal
            | Self::Unavailable
            | Self::DataLoss
            | Self::NetworkError
            | Self::Timeout
            | Self::Unrecognized(_) => ErrorCategory::Transient,
        }
    }

    /// Whether a failure with this code may be attempted again.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }

    /// User-facing message for this code in the given locale.
    pub fn localized_message(&self, locale: Locale) -> &'static str {
        let (english, vietnamese) = match self {
            Self::Unauthenticated => (
                "Not authenticated; please sign in again.",
                "Bạn chưa được xác thực. Vui lòng đăng nhập lại.",
            ),
            Self::PermissionDenied => (
                "You do not have permission for this resource.",
                "Bạn không có quyền truy cập tài nguyên này.",
            ),
            Self::NotFound => (
                "Requested resource not found.",
                "Không tìm thấy tài nguyên yêu cầu.",
            ),
            Self::InvalidArgument => ("Invalid argument.", "Tham số không hợp lệ."),
            Self::DeadlineExceeded => (
                "Request timed out; please retry.",
                "Yêu cầu vượt quá thời gian chờ. Vui lòng thử lại.",
            ),
            Self::Internal => (
                "Internal server error; please retry later.",
                "Lỗi máy chủ nội bộ. Vui lòng thử lại sau.",
            ),
            Self::Unavailable => (
                "Service unavailable; please retry later.",
                "Dịch vụ hiện không khả dụng. Vui lòng thử lại sau.",
            ),
            Self::DataLoss => (
                "Data loss occurred; contact support.",
                "Mất dữ liệu trong quá trình xử lý. Vui lòng liên hệ hỗ trợ.",
            ),
            Self::NetworkError => (
                "Network error; check your connection.",
                "Lỗi kết nối mạng. Vui lòng kiểm tra kết nối internet.",
            ),
            Self::Timeout => (
                "Request timed out; please retry.",
                "Yêu cầu hết thời gian chờ. Vui lòng thử lại.",
            ),
            Self::Cancelled => ("Request was cancelled.", "Yêu cầu đã bị hủy."),
            Self::Unrecognized(_) => (
                "An error occurred; please try again.",
                "Đã xảy ra lỗi. Vui lòng thử lại.",
            ),
        };

        match locale {
            Locale::English => english,
            Locale::Vietnamese => vietnamese,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::parse(&code))
    }
}
