//! Input checks shared by the services.

use ag_shared::utils::email;
use chrono::NaiveDate;

use crate::errors::ValidationError;

/// Trimmed value, or `RequiredField` when blank
pub fn required(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Normalised (trimmed, lower-cased) email
pub fn email_address(value: &str) -> Result<String, ValidationError> {
    let value = required("email", value)?;
    let normalized = email::normalize(&value);
    if !email::is_valid(&normalized) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(normalized)
}

pub fn password(value: &str, min_length: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "password".to_string(),
        });
    }
    if value.chars().count() < min_length {
        return Err(ValidationError::PasswordTooShort { min: min_length });
    }
    Ok(())
}

/// `YYYY-MM-DD`
pub fn birthdate(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = required("birthdate", value)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}
