//! Response bodies shared by the HTTP layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body for operations that only report an outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub store: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(healthy: bool, store: impl Into<String>) -> Self {
        Self {
            status: if healthy { "healthy" } else { "degraded" }.to_string(),
            service: "accessgate-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: store.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_body_shape() {
        let body = serde_json::to_value(MessageResponse::new("ok")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "ok" }));
    }

    #[test]
    fn test_health_status_text() {
        assert_eq!(HealthResponse::new(true, "memory").status, "healthy");
        assert_eq!(HealthResponse::new(false, "mysql").status, "degraded");
    }
}
