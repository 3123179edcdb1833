//! One-time code generation for registration and password reset.

use ag_shared::config::OtpConfig;
use chrono::Duration;

use crate::domain::entities::one_time_code::{OneTimeCode, DEFAULT_DIGITS};

/// Produces numeric codes with their expiry, per configured digit count and windows
#[derive(Debug, Clone)]
pub struct OtpGenerator {
    digits: u32,
    registration_validity: Duration,
    reset_validity: Duration,
}

impl OtpGenerator {
    pub fn new(digits: u32, registration_validity: Duration, reset_validity: Duration) -> Self {
        Self {
            digits,
            registration_validity,
            reset_validity,
        }
    }

    pub fn from_config(config: &OtpConfig) -> Self {
        Self::new(
            config.digits,
            Duration::minutes(config.registration_validity_minutes),
            Duration::minutes(config.reset_validity_minutes),
        )
    }

    pub fn registration_code(&self) -> OneTimeCode {
        OneTimeCode::generate(self.digits, self.registration_validity)
    }

    pub fn reset_code(&self) -> OneTimeCode {
        OneTimeCode::generate(self.digits, self.reset_validity)
    }

    pub fn registration_validity_minutes(&self) -> i64 {
        self.registration_validity.num_minutes()
    }

    pub fn reset_validity_minutes(&self) -> i64 {
        self.reset_validity.num_minutes()
    }
}

impl Default for OtpGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_DIGITS, Duration::minutes(10), Duration::minutes(10))
    }
}
