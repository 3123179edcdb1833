//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing, one-time codes and password hashing
//! - `database` - database connection and pool configuration
//! - `environment` - environment detection and logging configuration
//! - `mail` - outbound email provider
//! - `server` - HTTP server and CORS configuration
//! - `storage` - persistence backend and profile picture storage
//!
//! Every sub-config has a `Default` and a `from_env()` constructor. The
//! aggregated [`AppConfig`] is built once at process start and handed to the
//! components that need it.

pub mod auth;
pub mod database;
pub mod environment;
pub mod mail;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use auth::{JwtConfig, OtpConfig, PasswordConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider};
pub use server::{CorsConfig, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub otp: OtpConfig,
    pub password: PasswordConfig,
    pub mail: MailConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            otp: OtpConfig::default(),
            password: PasswordConfig::default(),
            mail: MailConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load the whole configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            otp: OtpConfig::from_env(),
            password: PasswordConfig::from_env(),
            mail: MailConfig::from_env(),
            storage: StorageConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Problems that must stop a production start-up
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.jwt.secret.len() < 16 {
            return Err("JWT_SECRET must be at least 16 characters".to_string());
        }
        if !(4..=10).contains(&self.otp.digits) {
            return Err(format!("OTP_DIGITS must be between 4 and 10, got {}", self.otp.digits));
        }
        if self.mail.provider == MailProvider::Http && self.mail.api_key.is_none() {
            return Err("MAIL_API_KEY is required for the http mail provider".to_string());
        }
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when it is absent or unparsable.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a non-empty environment variable
pub(crate) fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_requires_custom_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_otp_digits_bounds() {
        let mut config = AppConfig::default();
        config.otp.digits = 3;
        assert!(config.validate().is_err());
        config.otp.digits = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_mail_requires_api_key() {
        let mut config = AppConfig::default();
        config.mail.provider = MailProvider::Http;
        assert!(config.validate().is_err());
        config.mail.api_key = Some("key".to_string());
        assert!(config.validate().is_ok());
    }
}
