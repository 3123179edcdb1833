//! CORS configuration for browser clients.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use ag_shared::CorsConfig;

/// Creates a CORS middleware instance from the loaded configuration.
///
/// An empty origin list accepts any origin, which suits local development.
/// Deployments list their front-end origins in `CORS_ALLOWED_ORIGINS`.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = if config.allows_any_origin() {
        tracing::info!(event = "cors_configured", "CORS accepts any origin");
        Cors::default().allow_any_origin()
    } else {
        tracing::info!(
            event = "cors_configured",
            origins = ?config.allowed_origins,
            "CORS restricted to configured origins"
        );
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allowed_headers(vec![
        header::AUTHORIZATION,
        header::ACCEPT,
        header::CONTENT_TYPE,
        header::ORIGIN,
    ])
    .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
    .max_age(config.max_age)
}
