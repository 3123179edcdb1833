//! Public account lifecycle endpoints under `/api/auth`
//!
//! Registration, email verification, sign-in and password reset. None of
//! these require a token.

use actix_web::{web, HttpResponse};
use ag_core::services::AccountCheck;
use ag_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::auth::{
    CheckUserResponse, CodeRequest, EmailRequest, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, ResetPasswordRequest, VerifyRegisterResponse,
};
use crate::dto::validate_request;
use crate::handlers::error::ApiError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/verify-register", web::post().to(verify_register))
            .route("/login", web::post().to(login))
            .route("/forgot-password", web::post().to(forgot_password))
            .route("/verify-code", web::post().to(verify_code))
            .route("/reset-password", web::post().to(reset_password))
            .route("/check-user", web::post().to(check_user)),
    );
}

/// Handler for POST /api/auth/register
///
/// ## Success (201 Created)
/// ```json
/// { "message": "...", "account_id": "...", "account_no": 1000, "email": "alice@example.com", "approval_status": "unverified" }
/// ```
///
/// ## Errors
/// - 400 `validation_error`: Missing or malformed field
/// - 400 `user_already_exists`: The email belongs to an account that cannot be overwritten
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;
    let receipt = state.registration.register(request.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(RegisterResponse::from(receipt)))
}

/// Handler for POST /api/auth/verify-register
///
/// ## Errors
/// - 400 `invalid_code`: No outstanding code matches
/// - 400 `code_expired`: The code matched but is past its expiry
/// - 400 `already_processed`: The email was already confirmed
pub async fn verify_register(
    state: web::Data<AppState>,
    request: web::Json<CodeRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;
    let status = state
        .registration
        .verify_email(&request.email, &request.code)
        .await?;
    Ok(HttpResponse::Ok().json(VerifyRegisterResponse::for_status(status)))
}

/// Handler for POST /api/auth/login
///
/// ## Success (200 OK)
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiIs...", "token_type": "Bearer", "expires_in": 14400, "user": { ... } }
/// ```
///
/// ## Errors
/// - 400 `invalid_credentials`: Unknown email or wrong password
/// - 403 `verification_required`: A one-time code is still outstanding
/// - 403 `not_approved`: The account has not been approved
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;
    let result = state.auth.sign_in(&request.email, &request.password).await?;
    Ok(HttpResponse::Ok().json(LoginResponse::from(result)))
}

/// Handler for POST /api/auth/forgot-password
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;
    state.registration.forgot_password(&request.email).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Verification code sent to email")))
}

/// Handler for POST /api/auth/verify-code
///
/// Checks a reset code without consuming it.
pub async fn verify_code(
    state: web::Data<AppState>,
    request: web::Json<CodeRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;
    state
        .registration
        .verify_reset_code(&request.email, &request.code)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Code verified")))
}

/// Handler for POST /api/auth/reset-password
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;
    state
        .registration
        .reset_password(&request.email, &request.code, &request.password)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password has been reset")))
}

/// Handler for POST /api/auth/check-user
///
/// Destructive: an account that is not approved is deleted by this call.
pub async fn check_user(
    state: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;
    let response = match state.registration.check_account(&request.email).await? {
        AccountCheck::Approved => CheckUserResponse {
            message: "User is approved".to_string(),
            status: "approved".to_string(),
        },
        AccountCheck::Deleted => CheckUserResponse {
            message: "User was not approved and has been deleted".to_string(),
            status: "deleted".to_string(),
        },
    };
    Ok(HttpResponse::Ok().json(response))
}
