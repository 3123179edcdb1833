//! Main authentication service implementation

use std::sync::Arc;

use ag_shared::utils::email::{mask, normalize};
use serde::Serialize;

use crate::domain::value_objects::AccountView;
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::AccountRepository;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;
use crate::services::validation;

/// Successful sign-in: the access token plus the caller's public profile
#[derive(Debug, Clone, Serialize)]
pub struct SignInResult {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub account: AccountView,
}

/// Authentication service for credential sign-in
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: PasswordHasher,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
        }
    }

    /// Sign in with email and password
    ///
    /// # Returns
    /// * `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// * `Err(AuthError::VerificationRequired)` - A one-time code is outstanding
    /// * `Err(AuthError::NotApproved)` - The account is not approved, or is flagged expired
    pub async fn sign_in(&self, email: &str, password: &str) -> DomainResult<SignInResult> {
        let email = validation::required("email", email)?;
        if password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }

        let account = match self.accounts.find_by_email(&normalize(&email)).await? {
            Some(account) => account,
            None => {
                tracing::info!(event = "sign_in_failed", email = %mask(&email), "Unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.hasher.verify(password, &account.password_hash).await? {
            tracing::info!(
                event = "sign_in_failed",
                account_id = %account.id,
                "Password mismatch"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if account.has_outstanding_code() {
            return Err(AuthError::VerificationRequired.into());
        }

        if !account.is_live() {
            tracing::info!(
                event = "sign_in_blocked",
                account_id = %account.id,
                status = %account.approval_status,
                "Account not approved"
            );
            return Err(AuthError::NotApproved.into());
        }

        let issued = self.tokens.issue(&account)?;
        tracing::info!(
            event = "sign_in",
            account_id = %account.id,
            role = %account.role,
            "Access token issued"
        );

        Ok(SignInResult {
            token: issued.token,
            expires_in: issued.expires_in,
            account: AccountView::from(account),
        })
    }
}
