//! Shared wiring for HTTP tests: the full application over in-memory stores

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use ag_api::{AppState, Collaborators};
use ag_core::domain::{Account, NewAccount, Role};
use ag_core::repositories::{AccountRepository, InMemoryAccountRepository, InMemoryRoleRepository};
use ag_core::services::{InMemoryObjectStorage, PasswordHasher, RecordingNotificationSink, RoleService};
use ag_shared::AppConfig;
use chrono::NaiveDate;

pub const MAX_UPLOAD: usize = 64;

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub sink: Arc<RecordingNotificationSink>,
    pub storage: Arc<InMemoryObjectStorage>,
}

impl TestContext {
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.password.bcrypt_cost = 4;
        config.storage.max_upload_bytes = MAX_UPLOAD;

        let accounts = Arc::new(InMemoryAccountRepository::new());
        let roles = Arc::new(InMemoryRoleRepository::new());
        let sink = Arc::new(RecordingNotificationSink::new());
        let storage = Arc::new(InMemoryObjectStorage::new());

        RoleService::new(roles.clone()).seed_defaults().await.unwrap();

        let state = AppState::new(
            &config,
            Collaborators {
                accounts: accounts.clone(),
                roles,
                notifications: sink.clone(),
                storage: storage.clone(),
                database: None,
            },
        );

        Self {
            state: web::Data::new(state),
            accounts,
            sink,
            storage,
        }
    }

    /// Store an approved account that signs in with `password`
    pub async fn seed_account(&self, email: &str, password: &str, role: Role) -> Account {
        let hash = PasswordHasher::new(4).hash(password).await.unwrap();
        let details = NewAccount {
            name: "Seeded".to_string(),
            surname: "Account".to_string(),
            email: email.to_string(),
            password_hash: hash,
            birthdate: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap(),
        };
        self.accounts
            .create(Account::provisioned(details, role))
            .await
            .unwrap()
    }

    pub async fn account(&self, email: &str) -> Option<Account> {
        self.accounts.find_by_email(email).await.unwrap()
    }

    pub async fn code_for(&self, email: &str) -> String {
        self.sink
            .last_code_for(email)
            .await
            .unwrap_or_else(|| panic!("no code mailed to {email}"))
    }
}

pub fn registration(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Alice",
        "surname": "Liddell",
        "email": email,
        "password": password,
        "birthdate": "1990-05-04"
    })
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Build the application for `$ctx` and run it through `test::init_service`
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(ag_api::create_app(
            $ctx.state.clone(),
            &ag_shared::CorsConfig::default(),
            ag_shared::Environment::Development,
        ))
        .await
    };
}

/// Sign in through the API and return the access token
#[macro_export]
macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({ "email": $email, "password": $password }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK, "login failed for {}", $email);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["token"].as_str().unwrap().to_string()
    }};
}
