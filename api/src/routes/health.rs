use actix_web::{web, HttpResponse};
use ag_shared::HealthResponse;

use crate::app::AppState;

/// Health check endpoint handler
///
/// With the MySQL backend the pool is pinged; a failed ping answers 503.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let Some(database) = &state.database else {
        return HttpResponse::Ok().json(HealthResponse::new(true, "memory"));
    };

    match database.health_check().await {
        Ok(true) => HttpResponse::Ok().json(HealthResponse::new(true, "mysql")),
        Ok(false) => HttpResponse::ServiceUnavailable().json(HealthResponse::new(false, "mysql")),
        Err(e) => {
            tracing::warn!(event = "health_check_failed", error = %e, "Database ping failed");
            HttpResponse::ServiceUnavailable().json(HealthResponse::new(false, "mysql"))
        }
    }
}
