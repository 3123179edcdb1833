//! Error kinds for authentication, token handling and input validation
//!
//! Messages are short and safe to show to clients. The HTTP layer maps each
//! variant to a status code and a stable error code.

use thiserror::Error;

/// Authentication and lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Email verification required. Check your email for the code")]
    VerificationRequired,

    #[error("Your account is not approved yet")]
    NotApproved,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Request has already been processed")]
    AlreadyProcessed,

    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    #[error("Approval status cannot change from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Invalid date format")]
    InvalidDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_do_not_reveal_which_credential_failed() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_field_errors_name_the_field() {
        let error = ValidationError::RequiredField {
            field: "surname".to_string(),
        };
        assert_eq!(error.to_string(), "Field required: surname");
    }

    #[test]
    fn test_invalid_role_message() {
        let error = AuthError::InvalidRole {
            role: "owner".to_string(),
        };
        assert!(error.to_string().contains("owner"));
    }
}
