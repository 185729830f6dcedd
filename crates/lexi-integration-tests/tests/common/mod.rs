//! Common test utilities and fixtures
//!
//! A minimal `reqwest` client for the two backend functions plus canned
//! response bodies for wiremock.

#![allow(dead_code)]

use lexi_protocol::{ChatData, ChatRequest, ChatResponse, FunctionError, HealthStatus};
use serde_json::{Value, json};

pub const TEST_TOKEN: &str = "test-id-token";
pub const CHAT_PATH: &str = "/chatWithLexi";
pub const HEALTH_PATH: &str = "/healthCheck";

/// POST a chat request and decode the reply or the failure.
pub async fn post_chat(
    client: &reqwest::Client,
    base_url: &str,
    request: &ChatRequest,
) -> Result<ChatData, FunctionError> {
    request.validate()?;

    let response = client
        .post(format!("{base_url}{CHAT_PATH}"))
        .bearer_auth(TEST_TOKEN)
        .json(request)
        .send()
        .await
        .map_err(transport_error)?;

    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;
    if !status.is_success() {
        return Err(FunctionError::from_response(status.as_u16(), &body));
    }

    ChatResponse::from_json(&body)?.into_result()
}

/// GET the health check.
pub async fn get_health(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<HealthStatus, FunctionError> {
    let response = client
        .get(format!("{base_url}{HEALTH_PATH}"))
        .send()
        .await
        .map_err(transport_error)?;

    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;
    if !status.is_success() {
        return Err(FunctionError::from_response(status.as_u16(), &body));
    }

    Ok(HealthStatus::from_json(&body)?)
}

fn transport_error(err: reqwest::Error) -> FunctionError {
    if err.is_timeout() {
        FunctionError::new("timeout", err.to_string())
    } else if err.is_connect() {
        FunctionError::new("network-error", err.to_string())
    } else {
        FunctionError::uncoded(err.to_string())
    }
}

pub fn chat_ok(response: &str) -> Value {
    json!({
        "success": true,
        "data": {
            "response": response,
            "timestamp": 1_700_000_000_000_i64
        }
    })
}

pub fn chat_scored(response: &str, overall: u32) -> Value {
    json!({
        "success": true,
        "data": {
            "response": response,
            "score": {
                "overall": overall,
                "grammar": overall,
                "vocabulary": overall,
                "fluency": overall
            },
            "timestamp": 1_700_000_000_000_i64
        }
    })
}

pub fn chat_error(message: &str) -> Value {
    json!({ "success": false, "error": message })
}

pub fn health_ok() -> Value {
    json!({
        "status": "healthy",
        "timestamp": "2024-05-01T08:30:00.000Z",
        "version": "1.0.0"
    })
}
