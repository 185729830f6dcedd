//! Chat types for the `chatWithLexi` function
//!
//! Field names follow the function's JSON (`includeScoring`,
//! `conversationHistory`).

use crate::error::{FunctionError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message returned by the backend when the request has no text.
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Message used when a failed body carries no error text.
const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Who produced a turn of the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The learner
    User,
    /// Lexi
    Assistant,
}

/// One earlier turn sent as context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who said it
    pub role: ChatRole,

    /// What was said
    pub content: String,
}

impl ChatTurn {
    /// A learner turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// A Lexi turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Body of a `chatWithLexi` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The learner's message
    pub message: String,

    /// Ask for a score alongside the reply
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_scoring: bool,

    /// Earlier turns, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conversation_history: Vec<ChatTurn>,
}

impl ChatRequest {
    /// Request for a single message without history.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            include_scoring: false,
            conversation_history: Vec::new(),
        }
    }

    /// Ask for a score.
    pub fn with_scoring(mut self) -> Self {
        self.include_scoring = true;
        self
    }

    /// Attach earlier turns.
    pub fn with_history(mut self, history: impl IntoIterator<Item = ChatTurn>) -> Self {
        self.conversation_history.extend(history);
        self
    }

    /// Reject a request the backend would refuse with 400.
    pub fn validate(&self) -> std::result::Result<(), FunctionError> {
        if self.message.trim().is_empty() {
            return Err(FunctionError::new("invalid-argument", MESSAGE_REQUIRED));
        }
        Ok(())
    }

    /// Serialize to a JSON body.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Scores for a learner's message, each out of 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Overall score
    pub overall: f64,
    /// Grammar
    pub grammar: f64,
    /// Vocabulary
    pub vocabulary: f64,
    /// Fluency
    pub fluency: f64,
}

/// Payload of a successful reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatData {
    /// Lexi's reply
    pub response: String,

    /// Present when scoring was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,

    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl ChatData {
    /// Reply stamped with the current time.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            score: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Attach a score.
    pub fn with_score(mut self, score: Score) -> Self {
        self.score = Some(score);
        self
    }

    /// The timestamp as a date, if it is in range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Body of a `chatWithLexi` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Whether the call succeeded
    pub success: bool,

    /// Reply, present on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ChatData>,

    /// Error text, present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    /// Successful response.
    pub fn ok(data: ChatData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed response.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Parse a JSON body.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// The reply, or the reported failure.
    ///
    /// A failed body carries no code, so the error is classified from its text.
    /// A successful body without `data` is an `internal` error.
    pub fn into_result(self) -> std::result::Result<ChatData, FunctionError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(crate::error::ProtocolError::MissingField("data".to_string()).into()),
            (false, _) => Err(FunctionError::uncoded(
                self.error.unwrap_or_else(|| INTERNAL_SERVER_ERROR.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let request = ChatRequest::new("I goes to school")
            .with_scoring()
            .with_history([ChatTurn::user("Hi"), ChatTurn::assistant("Hello! Ready to practice?")]);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "message": "I goes to school",
                "includeScoring": true,
                "conversationHistory": [
                    {"role": "user", "content": "Hi"},
                    {"role": "assistant", "content": "Hello! Ready to practice?"}
                ]
            })
        );
    }

    #[test]
    fn test_minimal_request_omits_optionals() {
        let json = ChatRequest::new("hello").to_json().unwrap();
        assert_eq!(json, r#"{"message":"hello"}"#);

        let parsed: ChatRequest = serde_json::from_str(&json).unwrap();
        assert!(!parsed.include_scoring);
        assert!(parsed.conversation_history.is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_message() {
        let err = ChatRequest::new("   ").validate().unwrap_err();
        assert_eq!(err.code(), Some("invalid-argument"));
        assert_eq!(err.message(), MESSAGE_REQUIRED);
        assert!(ChatRequest::new("hi").validate().is_ok());
    }

    #[test]
    fn test_scored_reply() {
        let body = r#"{
            "success": true,
            "data": {
                "response": "Close! Say \"I go to school\".",
                "score": {"overall": 72, "grammar": 60, "vocabulary": 80, "fluency": 75.5},
                "timestamp": 1700000000000
            }
        }"#;

        let data = ChatResponse::from_json(body).unwrap().into_result().unwrap();
        let score = data.score.unwrap();
        assert_eq!(score.overall, 72.0);
        assert_eq!(score.fluency, 75.5);
        assert_eq!(data.created_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_failure_body_into_error() {
        let err = ChatResponse::failure("Unauthorized").into_result().unwrap_err();
        assert_eq!(err.code(), None);
        assert_eq!(err.message(), "Unauthorized");

        let err = ChatResponse::from_json(r#"{"success":false}"#)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(err.message(), INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_success_without_data() {
        let err = ChatResponse::from_json(r#"{"success":true}"#)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(err.code(), Some("internal"));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            ChatResponse::from_json("not json"),
            Err(crate::error::ProtocolError::SerializationError(_))
        ));
    }

    #[test]
    fn test_ok_round_trip() {
        let response = ChatResponse::ok(ChatData::new("Xin chào!"));
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("error"));
        assert_eq!(ChatResponse::from_json(&json).unwrap(), response);
    }
}
