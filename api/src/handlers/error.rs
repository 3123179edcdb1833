//! Mapping from domain errors to HTTP responses
//!
//! Every failure leaves the API as an [`ErrorResponse`] envelope. Internal
//! failures are logged with their detail and reported to the client with a
//! generic message.

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use ag_core::errors::{AuthError, DomainError, TokenError};
use ag_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error returned by handlers and middleware
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code, message),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
    }

    /// Field errors reported by `validator`
    pub fn invalid_request(errors: &ValidationErrors) -> Self {
        let mut error = Self::validation("Invalid request data");
        error.body = error.body.add_detail("validation_errors", errors);
        error
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, error_codes::FORBIDDEN, message)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            INTERNAL_MESSAGE,
        )
    }

}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.body.message, self.body.error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let (status, code) = classify(&error);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(event = "internal_error", error = %error, "Request failed");
            return ApiError::internal();
        }
        tracing::debug!(event = "request_rejected", code, error = %error, "Request rejected");
        ApiError::new(status, code, error.to_string())
    }
}

/// Status and stable error code for each domain error
fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
            (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR)
        }
        DomainError::Conflict { .. } => (StatusCode::BAD_REQUEST, error_codes::CONFLICT),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Unauthorized => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
        DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_CREDENTIALS)
            }
            AuthError::InvalidCode => (StatusCode::BAD_REQUEST, error_codes::INVALID_CODE),
            AuthError::CodeExpired => (StatusCode::BAD_REQUEST, error_codes::CODE_EXPIRED),
            AuthError::VerificationRequired => {
                (StatusCode::FORBIDDEN, error_codes::VERIFICATION_REQUIRED)
            }
            AuthError::NotApproved => (StatusCode::FORBIDDEN, error_codes::NOT_APPROVED),
            AuthError::UserAlreadyExists => {
                (StatusCode::BAD_REQUEST, error_codes::USER_ALREADY_EXISTS)
            }
            AuthError::AlreadyProcessed => {
                (StatusCode::BAD_REQUEST, error_codes::ALREADY_PROCESSED)
            }
            AuthError::InvalidRole { .. } => (StatusCode::BAD_REQUEST, error_codes::INVALID_ROLE),
            AuthError::InvalidTransition { .. } => (StatusCode::BAD_REQUEST, error_codes::CONFLICT),
            AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
        },
        DomainError::Token(TokenError::TokenGenerationFailed) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
        DomainError::Token(_) => (StatusCode::BAD_REQUEST, error_codes::INVALID_TOKEN),
    }
}
