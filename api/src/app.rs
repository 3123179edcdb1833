//! Application state and factory
//!
//! [`AppState`] owns every service the handlers call. It is built once from
//! the loaded [`AppConfig`] and the chosen backends, then shared across
//! workers through `web::Data`.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use ag_core::repositories::{AccountRepository, RoleRepository};
use ag_core::services::{
    AdminService, AuthService, AuthorizationGate, NotificationSink, Notifier, ObjectStorage,
    OtpGenerator, PasswordHasher, ProfileService, RegistrationConfig, RegistrationService,
    RoleService, TokenService, TokenServiceConfig,
};
use ag_infra::database::DatabasePool;
use ag_shared::{error_codes, AppConfig, CorsConfig, Environment, ErrorResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::error::ApiError;
use crate::middleware::{cors::create_cors, security::SecurityMiddleware};
use crate::routes;

/// Backends the services are wired over
pub struct Collaborators {
    pub accounts: Arc<dyn AccountRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub notifications: Arc<dyn NotificationSink>,
    pub storage: Arc<dyn ObjectStorage>,
    /// Present when accounts live in MySQL; used by the health check
    pub database: Option<DatabasePool>,
}

/// Application state that holds shared services
pub struct AppState {
    pub registration: RegistrationService,
    pub auth: AuthService,
    pub gate: AuthorizationGate,
    pub admin: AdminService,
    pub roles: RoleService,
    pub profile: ProfileService,
    pub database: Option<DatabasePool>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &AppConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            accounts,
            roles,
            notifications,
            storage,
            database,
        } = collaborators;

        let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.jwt)));
        let hasher = PasswordHasher::from_config(&config.password);
        let notifier = Notifier::new(notifications);
        let registration_config = RegistrationConfig::from_configs(&config.otp, &config.password);
        let max_upload_bytes = config.storage.max_upload_bytes;

        Self {
            registration: RegistrationService::new(
                accounts.clone(),
                hasher.clone(),
                OtpGenerator::from_config(&config.otp),
                notifier.clone(),
                registration_config,
            ),
            auth: AuthService::new(accounts.clone(), hasher.clone(), tokens.clone()),
            gate: AuthorizationGate::new(tokens, roles.clone()),
            admin: AdminService::new(
                accounts.clone(),
                hasher,
                notifier,
                config.password.min_length,
            ),
            roles: RoleService::new(roles),
            profile: ProfileService::new(accounts, storage, max_upload_bytes),
            database,
            max_upload_bytes,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    cors: &CorsConfig,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            ApiError::validation(format!("Invalid JSON body: {}", err)).into()
        }))
        .app_data(web::PathConfig::default().error_handler(|_err, _req| {
            ApiError::validation("Invalid identifier in path").into()
        }))
        // Last wrapped runs first: tracing, then CORS, then security headers
        .wrap(SecurityMiddleware::for_environment(environment))
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api")
                .configure(routes::auth::configure)
                .configure(routes::admin::configure)
                .configure(routes::roles::configure)
                .configure(routes::user::configure),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
