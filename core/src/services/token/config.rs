//! Configuration for the token service

use ag_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_expiry_seconds: config.access_token_expiry,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}
