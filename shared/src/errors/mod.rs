//! Shared error envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Short human-readable message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes carried in [`ErrorResponse::error`]
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const CONFLICT: &str = "conflict";
    pub const USER_ALREADY_EXISTS: &str = "user_already_exists";
    pub const ALREADY_PROCESSED: &str = "already_processed";
    pub const NOT_FOUND: &str = "not_found";
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const INVALID_CODE: &str = "invalid_code";
    pub const CODE_EXPIRED: &str = "code_expired";
    pub const INVALID_ROLE: &str = "invalid_role";
    pub const VERIFICATION_REQUIRED: &str = "verification_required";
    pub const NOT_APPROVED: &str = "not_approved";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const INVALID_TOKEN: &str = "invalid_token";
    pub const FORBIDDEN: &str = "forbidden";
    pub const INTERNAL_ERROR: &str = "internal_error";
}
