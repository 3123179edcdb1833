//! Request and response bodies of the HTTP surface

pub mod admin;
pub mod auth;

use validator::Validate;

use crate::handlers::error::ApiError;

/// Run `validator` rules on a request body
pub fn validate_request<T: Validate>(request: &T) -> Result<(), ApiError> {
    request
        .validate()
        .map_err(|errors| ApiError::invalid_request(&errors))
}
