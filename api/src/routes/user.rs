//! Self-service endpoints under `/api/user`

use actix_web::{http::header::CONTENT_TYPE, web, HttpRequest, HttpResponse};
use futures_util::StreamExt;

use crate::app::AppState;
use crate::handlers::error::ApiError;
use crate::middleware::auth::{AuthenticatedUser, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .wrap(JwtAuth::authenticated())
            .route("/profile", web::get().to(profile))
            .route("/upload-profile-picture", web::post().to(upload_profile_picture)),
    );
}

/// Handler for GET /api/user/profile
pub async fn profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let view = state.profile.get_profile(user.0.account_id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Handler for POST /api/user/upload-profile-picture
///
/// The body is the raw image with an `image/*` content type, for example
/// `curl --data-binary @me.png -H 'Content-Type: image/png'`.
pub async fn upload_profile_picture(
    req: HttpRequest,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let content_type = media_type(&req);
    let bytes = read_limited(payload, state.max_upload_bytes).await?;

    let view = state
        .profile
        .upload_picture(user.0.account_id, &content_type, bytes)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Media type without parameters, lower-cased. Empty when absent.
fn media_type(req: &HttpRequest) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Collect the body, stopping one chunk past `limit` so oversize uploads are
/// rejected without buffering all of them
async fn read_limited(mut payload: web::Payload, limit: usize) -> Result<Vec<u8>, ApiError> {
    let mut body = Vec::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| ApiError::validation(format!("Unreadable request body: {}", e)))?;
        body.extend_from_slice(&chunk);
        if body.len() > limit {
            break;
        }
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[::std::prelude::v1::test]
    fn test_media_type_drops_parameters() {
        let req = test::TestRequest::default()
            .insert_header((CONTENT_TYPE, "Image/PNG; charset=binary"))
            .to_http_request();
        assert_eq!(media_type(&req), "image/png");

        let req = test::TestRequest::default().to_http_request();
        assert_eq!(media_type(&req), "");
    }
}
