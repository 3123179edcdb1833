//! Main token service implementation

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signed access token and its lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    /// Seconds until expiry
    pub expires_in: i64,
}

/// Issues and verifies access tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Expiry is exact; jsonwebtoken defaults to 60 seconds of grace
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Access token lifetime in seconds
    pub fn expires_in(&self) -> i64 {
        self.config.access_token_expiry_seconds
    }

    /// Sign an access token for `account`
    pub fn issue(&self, account: &Account) -> Result<IssuedToken, DomainError> {
        let claims = Claims::for_account(
            account,
            Duration::seconds(self.config.access_token_expiry_seconds),
            &self.config.issuer,
            &self.config.audience,
        );
        let token = self.encode_jwt(&claims)?;
        Ok(IssuedToken {
            token,
            expires_in: self.config.access_token_expiry_seconds,
        })
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Decode and validate signature, expiry, issuer and audience
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience
                | ErrorKind::ImmatureSignature
                | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
                _ => TokenError::InvalidTokenFormat,
            })?;

        Ok(token_data.claims)
    }
}
