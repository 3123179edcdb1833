//! Authentication configuration: token signing, one-time codes, password hashing

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 4 * 3600, // 4 hours
            issuer: String::from("accessgate"),
            audience: String::from("accessgate-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: env_opt("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            issuer: env_opt("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: env_opt("JWT_AUDIENCE").unwrap_or(defaults.audience),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// One-time code configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    pub digits: u32,

    /// Validity of a registration code in minutes
    pub registration_validity_minutes: i64,

    /// Validity of a password reset code in minutes
    pub reset_validity_minutes: i64,

    /// Whether verified accounts wait for an administrator before sign-in
    pub require_admin_approval: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            digits: 6,
            registration_validity_minutes: 10,
            reset_validity_minutes: 10,
            require_admin_approval: true,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            digits: env_or("OTP_DIGITS", defaults.digits),
            registration_validity_minutes: env_or(
                "OTP_REGISTRATION_VALIDITY_MINUTES",
                defaults.registration_validity_minutes,
            ),
            reset_validity_minutes: env_or(
                "OTP_RESET_VALIDITY_MINUTES",
                defaults.reset_validity_minutes,
            ),
            require_admin_approval: env_or(
                "REQUIRE_ADMIN_APPROVAL",
                defaults.require_admin_approval,
            ),
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 10,
            min_length: 6,
        }
    }
}

impl PasswordConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bcrypt_cost: env_or("BCRYPT_COST", defaults.bcrypt_cost),
            min_length: env_or("PASSWORD_MIN_LENGTH", defaults.min_length),
        }
    }
}
