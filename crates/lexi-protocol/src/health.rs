//! Body of the `healthCheck` function

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status string of a healthy backend.
pub const HEALTHY: &str = "healthy";

/// Version the backend functions report.
pub const BACKEND_VERSION: &str = "1.0.0";

/// Health check reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` when the backend is up
    pub status: String,

    /// When the check ran (ISO 8601)
    pub timestamp: DateTime<Utc>,

    /// Backend version
    pub version: String,
}

impl HealthStatus {
    /// A healthy status stamped now.
    pub fn healthy() -> Self {
        Self {
            status: HEALTHY.to_string(),
            timestamp: Utc::now(),
            version: BACKEND_VERSION.to_string(),
        }
    }

    /// Whether the backend reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }

    /// Parse a JSON body.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_body() {
        let body = r#"{"status":"healthy","timestamp":"2024-05-01T08:30:00.000Z","version":"1.0.0"}"#;
        let health = HealthStatus::from_json(body).unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.version, BACKEND_VERSION);
        assert_eq!(health.timestamp.to_rfc3339(), "2024-05-01T08:30:00+00:00");
    }

    #[test]
    fn test_degraded_status() {
        let body = r#"{"status":"degraded","timestamp":"2024-05-01T08:30:00Z","version":"1.0.0"}"#;
        assert!(!HealthStatus::from_json(body).unwrap().is_healthy());
    }

    #[test]
    fn test_healthy_round_trip() {
        let health = HealthStatus::healthy();
        let json = serde_json::to_string(&health).unwrap();
        assert_eq!(HealthStatus::from_json(&json).unwrap(), health);
    }
}
