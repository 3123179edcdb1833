//! Bearer token authentication for protected scopes.
//!
//! [`JwtAuth`] resolves the `Authorization` header through the
//! [`AuthorizationGate`](ag_core::services::AuthorizationGate) held in the
//! application state and stores the resulting [`Principal`] in the request
//! extensions. A scope built with [`JwtAuth::require_roles`] also rejects
//! principals outside the listed roles before any handler runs.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use ag_core::domain::Role;
use ag_core::errors::{DomainError, TokenError};
use ag_core::services::Principal;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::app::AppState;
use crate::handlers::error::ApiError;

/// Authentication middleware factory
#[derive(Debug, Clone, Default)]
pub struct JwtAuth {
    /// `None` admits any authenticated caller
    allowed_roles: Option<Rc<[Role]>>,
}

impl JwtAuth {
    /// Any valid token is enough
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// Valid token whose role is one of `roles`
    pub fn require_roles(roles: &[Role]) -> Self {
        Self {
            allowed_roles: Some(Rc::from(roles)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Option<Rc<[Role]>>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            let principal = match resolve_principal(&req, allowed_roles.as_deref()) {
                Ok(principal) => principal,
                Err(error) => {
                    let response = error.error_response().map_into_right_body();
                    return Ok(req.into_response(response));
                }
            };

            req.extensions_mut().insert(principal);
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Authenticate the caller and, when `allowed_roles` is set, check its role
fn resolve_principal(
    req: &ServiceRequest,
    allowed_roles: Option<&[Role]>,
) -> Result<Principal, ApiError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!(event = "state_missing", "Application state not registered");
        ApiError::internal()
    })?;

    let principal = state.gate.authenticate(authorization_header(req)?)?;
    if let Some(roles) = allowed_roles {
        state.gate.require_role(&principal, roles)?;
    }
    Ok(principal)
}

/// Raw `Authorization` value. A header that is not valid text cannot be a token.
fn authorization_header(req: &ServiceRequest) -> Result<Option<&str>, ApiError> {
    match req.headers().get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| ApiError::from(DomainError::from(TokenError::InvalidTokenFormat))),
    }
}

/// Extractor for the principal placed by [`JwtAuth`]
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<Principal>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| ApiError::from(DomainError::Unauthorized));

        ready(result)
    }
}
