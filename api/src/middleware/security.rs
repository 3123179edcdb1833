//! Security middleware for HTTPS enforcement and response hardening headers.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderName, HeaderValue},
    Error, ResponseError,
};
use ag_shared::Environment;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::handlers::error::ApiError;

/// Security middleware factory
#[derive(Debug, Clone, Copy)]
pub struct SecurityMiddleware {
    /// Reject plain HTTP requests from non-local hosts
    enforce_https: bool,
}

impl SecurityMiddleware {
    pub fn new(enforce_https: bool) -> Self {
        Self { enforce_https }
    }

    /// HTTPS is enforced in production only
    pub fn for_environment(environment: Environment) -> Self {
        let enforce_https = environment.is_production();
        tracing::info!(event = "security_configured", enforce_https, "Security middleware configured");
        Self::new(enforce_https)
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
        }))
    }
}

pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    enforce_https: bool,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
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
        let enforce_https = self.enforce_https;

        Box::pin(async move {
            if enforce_https && !is_secure_request(&req) {
                tracing::warn!(
                    event = "insecure_request_blocked",
                    method = %req.method(),
                    path = req.path(),
                    "Plain HTTP request rejected"
                );
                let response = ApiError::forbidden("HTTPS required")
                    .error_response()
                    .map_into_right_body();
                return Ok(req.into_response(response));
            }

            let mut response = service.call(req).await?;
            add_security_headers(&mut response);
            Ok(response.map_into_left_body())
        })
    }
}

/// HTTPS directly, HTTPS as reported by a forwarding proxy, or a loopback host
fn is_secure_request(req: &ServiceRequest) -> bool {
    let conn_info = req.connection_info();
    if conn_info.scheme() == "https" {
        return true;
    }

    let host = conn_info.host();
    host.starts_with("localhost") || host.starts_with("127.0.0.1") || host.starts_with("[::1]")
}

const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none';"),
];

fn add_security_headers<B>(response: &mut ServiceResponse<B>) {
    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
}
