//! bcrypt password hashing.
//!
//! Hashing runs on the blocking thread pool so request workers are not stalled.

use ag_shared::config::PasswordConfig;

use crate::errors::{DomainError, DomainResult};

/// Salted one-way password hashing
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }

    pub async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(DomainError::internal)?
            .map_err(DomainError::internal)
    }

    /// `Ok(false)` for a mismatch and for a stored hash bcrypt cannot parse
    pub async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(DomainError::internal)?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
