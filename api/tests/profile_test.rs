//! Profile reads and picture uploads over HTTP

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use ag_core::domain::Role;
use serde_json::Value;

use common::{bearer, TestContext, MAX_UPLOAD};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 13];

#[actix_web::test]
async fn test_upload_replaces_previous_picture() {
    let ctx = TestContext::new().await;
    ctx.seed_account("heidi@example.com", "heidi-pw", Role::User).await;
    let app = test_app!(ctx);
    let token = login!(app, "heidi@example.com", "heidi-pw");

    let upload = || {
        test::TestRequest::post()
            .uri("/api/user/upload-profile-picture")
            .insert_header(bearer(&token))
            .insert_header(("Content-Type", "image/png"))
            .set_payload(PNG_BYTES)
            .to_request()
    };

    let first: Value = test::call_and_read_body_json(&app, upload()).await;
    let first_url = first["profile_picture"].as_str().unwrap().to_string();
    assert!(first_url.starts_with("memory://"));
    assert!(first_url.ends_with(".png"));

    let second: Value = test::call_and_read_body_json(&app, upload()).await;
    assert_ne!(second["profile_picture"].as_str().unwrap(), first_url);
    assert_eq!(ctx.storage.len().await, 1);

    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(bearer(&token))
        .to_request();
    let profile: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(profile["profile_picture"], second["profile_picture"]);
}

#[actix_web::test]
async fn test_upload_rejects_bad_input() {
    let ctx = TestContext::new().await;
    ctx.seed_account("ivan@example.com", "ivan-pw", Role::User).await;
    let app = test_app!(ctx);
    let token = login!(app, "ivan@example.com", "ivan-pw");

    let oversize = vec![0u8; MAX_UPLOAD + 1];
    let cases: Vec<(&str, Vec<u8>)> = vec![
        ("text/plain", b"hello".to_vec()),
        ("image/png", Vec::new()),
        ("image/png", oversize),
    ];

    for (content_type, payload) in cases {
        let req = test::TestRequest::post()
            .uri("/api/user/upload-profile-picture")
            .insert_header(bearer(&token))
            .insert_header(("Content-Type", content_type))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{content_type}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_error");
    }
    assert_eq!(ctx.storage.len().await, 0);
}

#[actix_web::test]
async fn test_profile_requires_token() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/user/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_health_and_unknown_route() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
