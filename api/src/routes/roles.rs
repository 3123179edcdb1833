//! Role and privilege management under `/api/roles`

use actix_web::{web, HttpResponse};
use ag_core::domain::{privileges, Role};
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::admin::{RoleBody, RoleUpdateBody};
use crate::dto::validate_request;
use crate::handlers::error::ApiError;
use crate::middleware::auth::{AuthenticatedUser, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/roles")
            .wrap(JwtAuth::require_roles(&Role::ADMINISTRATORS))
            .service(
                web::resource("")
                    .route(web::get().to(list_roles))
                    .route(web::post().to(create_role)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_role))
                    .route(web::put().to(update_role))
                    .route(web::delete().to(delete_role)),
            ),
    );
}

pub async fn list_roles(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.roles.list().await?))
}

pub async fn get_role(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.roles.get(path.into_inner()).await?))
}

pub async fn create_role(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<RoleBody>,
) -> Result<HttpResponse, ApiError> {
    state
        .gate
        .require_privilege(&user.0, privileges::MANAGE_ROLES)
        .await?;
    validate_request(&*request)?;

    let role = state.roles.create(request.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(role))
}

pub async fn update_role(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    request: web::Json<RoleUpdateBody>,
) -> Result<HttpResponse, ApiError> {
    state
        .gate
        .require_privilege(&user.0, privileges::MANAGE_ROLES)
        .await?;
    validate_request(&*request)?;

    let role = state
        .roles
        .update(path.into_inner(), request.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(role))
}

pub async fn delete_role(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state
        .gate
        .require_privilege(&user.0, privileges::MANAGE_ROLES)
        .await?;

    state.roles.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
