//! Access token claims.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{Account, Role};

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    pub email: String,

    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    pub iss: String,

    pub aud: String,

    /// JWT ID
    pub jti: String,
}

impl Claims {
    /// Claims for an access token issued to `account`, valid for `lifetime`
    pub fn for_account(account: &Account, lifetime: Duration, issuer: &str, audience: &str) -> Self {
        Self::issued_at(account, Utc::now(), lifetime, issuer, audience)
    }

    pub fn issued_at(
        account: &Account,
        now: DateTime<Utc>,
        lifetime: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let expiry = now + lifetime;
        Self {
            sub: account.id.to_string(),
            email: account.email.clone(),
            role: account.role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Account id carried in `sub`
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
