use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::account::Role;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::RoleRepository;
use crate::services::token::TokenService;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated caller, taken from a verified access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub account_id: Uuid,
    pub email: String,
    pub role: Role,
}

pub struct AuthorizationGate {
    tokens: Arc<TokenService>,
    roles: Arc<dyn RoleRepository>,
}

impl AuthorizationGate {
    pub fn new(tokens: Arc<TokenService>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { tokens, roles }
    }

    /// Resolve the `Authorization` header value into a principal
    ///
    /// # Returns
    /// * `Err(DomainError::Unauthorized)` - No header, or a blank one
    /// * `Err(DomainError::Token(_))` - Not a bearer token, or the token fails verification
    pub fn authenticate(&self, authorization: Option<&str>) -> DomainResult<Principal> {
        let header = match authorization.map(str::trim) {
            Some(value) if !value.is_empty() => value,
            _ => return Err(DomainError::Unauthorized),
        };

        let token = extract_bearer_token(header).ok_or(TokenError::InvalidTokenFormat)?;
        let claims = self.tokens.verify(token)?;
        let account_id = claims
            .account_id()
            .map_err(|_| TokenError::InvalidClaims)?;

        Ok(Principal {
            account_id,
            email: claims.email,
            role: claims.role,
        })
    }

    /// Allow only principals whose role is in `allowed`
    pub fn require_role(&self, principal: &Principal, allowed: &[Role]) -> DomainResult<()> {
        if allowed.contains(&principal.role) {
            return Ok(());
        }
        tracing::info!(
            event = "access_denied",
            account_id = %principal.account_id,
            role = %principal.role,
            "Role not permitted"
        );
        Err(AuthError::InsufficientPermissions.into())
    }

    /// Allow only principals whose role currently grants `privilege`
    pub async fn require_privilege(&self, principal: &Principal, privilege: &str) -> DomainResult<()> {
        let granted = self
            .roles
            .find_by_name(principal.role.as_str())
            .await?
            .map(|record| record.has_privilege(privilege))
            .unwrap_or(false);

        if granted {
            return Ok(());
        }
        tracing::info!(
            event = "access_denied",
            account_id = %principal.account_id,
            role = %principal.role,
            privilege,
            "Privilege not granted"
        );
        Err(AuthError::InsufficientPermissions.into())
    }
}

/// Token part of a `Bearer <token>` header. The scheme is case-insensitive.
fn extract_bearer_token(header: &str) -> Option<&str> {
    let scheme_len = BEARER_PREFIX.len();
    if header.len() <= scheme_len || !header.is_char_boundary(scheme_len) {
        return None;
    }
    let (scheme, token) = header.split_at(scheme_len);
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
