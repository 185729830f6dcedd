//! Error types for protocol operations
//!
//! [`ProtocolError`] covers malformed bodies. [`FunctionError`] is what a
//! backend function reported, decoded from its HTTP status and JSON body.

use lexi_core::error::Failure;
use serde_json::Value;
use std::fmt;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur during protocol operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// JSON serialization/deserialization error
    SerializationError(String),

    /// Missing required field
    MissingField(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Self::MissingField(field) => write!(f, "Missing required field: {}", field),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A failure reported by a backend function.
///
/// Carries the code, message, and HTTP status the executor classifies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FunctionError {
    code: Option<String>,
    message: String,
    status_code: Option<u16>,
}

impl FunctionError {
    /// Error with an explicit code.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            status_code: None,
        }
    }

    /// Error without a code; classification falls back to the message text.
    pub fn uncoded(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            status_code: None,
        }
    }

    /// Decode an unsuccessful HTTP response.
    ///
    /// The code comes from the status: 400 `invalid-argument`, 401
    /// `unauthenticated`, 403 `permission-denied`, 404 `not-found`, 408 and
    /// 504 `deadline-exceeded`, 503 `unavailable`, other 5xx `internal`.
    /// Other statuses carry no code.
    ///
    /// The message is taken from the body's `error` field, either a string
    /// (`{"success":false,"error":"..."}`) or an object with a `message`
    /// (`{"error":{"message":"...","status":"..."}}`). A body that is not JSON
    /// is used verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self {
            code: code_for_status(status).map(str::to_string),
            message: message_from_body(body).unwrap_or_else(|| format!("HTTP {status}")),
            status_code: Some(status),
        }
    }

    /// The reported code, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The reported message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the response, if this came from one.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

impl Failure for FunctionError {
    fn code(&self) -> Option<&str> {
        FunctionError::code(self)
    }

    fn message(&self) -> Option<String> {
        Some(self.message.clone())
    }

    fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

impl From<ProtocolError> for FunctionError {
    fn from(err: ProtocolError) -> Self {
        Self::new("internal", err.to_string())
    }
}

fn code_for_status(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("invalid-argument"),
        401 => Some("unauthenticated"),
        403 => Some("permission-denied"),
        404 => Some("not-found"),
        408 | 504 => Some("deadline-exceeded"),
        503 => Some("unavailable"),
        500..=599 => Some("internal"),
        _ => None,
    }
}

fn message_from_body(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    match json.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(Value::Object(error)) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
