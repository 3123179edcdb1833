//! Administrative endpoints under `/api/admin`
//!
//! The whole scope requires the `admin` or `super admin` role. Writes to
//! `/users` additionally need the matching privilege from the role store.

use actix_web::{web, HttpResponse};
use ag_core::domain::{privileges, Role};
use uuid::Uuid;

use crate::app::AppState;
use crate::dto::admin::{ApproveUserRequest, CreateUserBody, UpdateUserBody};
use crate::dto::validate_request;
use crate::handlers::error::ApiError;
use crate::middleware::auth::{AuthenticatedUser, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(JwtAuth::require_roles(&Role::ADMINISTRATORS))
            .route("/registration-requests", web::get().to(registration_requests))
            .route("/approve-user/{id}", web::post().to(approve_user))
            .route("/reject-user/{id}", web::post().to(reject_user))
            .service(
                web::resource("/users")
                    .route(web::get().to(list_users))
                    .route(web::post().to(create_user)),
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            ),
    );
}

/// Handler for GET /api/admin/registration-requests
///
/// Accounts whose email is confirmed and that wait for a decision.
pub async fn registration_requests(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let pending = state.admin.list_registration_requests().await?;
    Ok(HttpResponse::Ok().json(pending))
}

/// Handler for POST /api/admin/approve-user/{id}
///
/// The body is optional; `{"role": "admin"}` approves with a role other than
/// the account's current one. A body that does not parse is rejected before
/// anything is written.
pub async fn approve_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let role = ApproveUserRequest::from_body(&body)?.role;
    let account = state.admin.approve(path.into_inner(), role.as_deref()).await?;
    Ok(HttpResponse::Ok().json(account))
}

/// Handler for POST /api/admin/reject-user/{id}
pub async fn reject_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let account = state.admin.reject(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(account))
}

pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = state.admin.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user = state.admin.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Handler for POST /api/admin/users
///
/// The account is created approved and verified. Requires `create_user`.
pub async fn create_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<CreateUserBody>,
) -> Result<HttpResponse, ApiError> {
    state
        .gate
        .require_privilege(&user.0, privileges::CREATE_USER)
        .await?;
    validate_request(&*request)?;

    let created = state.admin.create_user(request.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Handler for PUT /api/admin/users/{id}. Requires `update_user`.
pub async fn update_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserBody>,
) -> Result<HttpResponse, ApiError> {
    state
        .gate
        .require_privilege(&user.0, privileges::UPDATE_USER)
        .await?;
    validate_request(&*request)?;

    let updated = state
        .admin
        .update_user(path.into_inner(), request.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Handler for DELETE /api/admin/users/{id}. Requires `delete_user`.
pub async fn delete_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state
        .gate
        .require_privilege(&user.0, privileges::DELETE_USER)
        .await?;

    state.admin.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
