//! Shared fixtures for service tests.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::entities::account::{Account, NewAccount, Role};
use crate::domain::entities::role::RoleRecord;
use crate::repositories::{
    AccountRepository, InMemoryAccountRepository, InMemoryRoleRepository, RoleRepository,
};
use crate::services::admin::AdminService;
use crate::services::auth::AuthService;
use crate::services::authorization::AuthorizationGate;
use crate::services::notification::{Notifier, RecordingNotificationSink};
use crate::services::otp::OtpGenerator;
use crate::services::password::PasswordHasher;
use crate::services::profile::ProfileService;
use crate::services::registration::{RegistrationConfig, RegistrationRequest, RegistrationService};
use crate::services::roles::RoleService;
use crate::services::storage::InMemoryObjectStorage;
use crate::services::token::{TokenService, TokenServiceConfig};

pub const TEST_SECRET: &str = "service-test-secret-0123456789";
pub const MAX_UPLOAD: usize = 1024;

pub fn token_service() -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: TEST_SECRET.to_string(),
        access_token_expiry_seconds: 4 * 3600,
        issuer: "accessgate".to_string(),
        audience: "accessgate-api".to_string(),
    })
}

/// Cheapest bcrypt cost, so tests stay fast
pub fn hasher() -> PasswordHasher {
    PasswordHasher::new(4)
}

pub fn details(email: &str, password_hash: &str) -> NewAccount {
    NewAccount {
        name: "Test".to_string(),
        surname: "Account".to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        birthdate: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
    }
}

pub fn approved_account(email: &str, role: Role) -> Account {
    Account::provisioned(details(email, "unused"), role)
}

pub fn signup(email: &str, password: &str) -> RegistrationRequest {
    RegistrationRequest {
        name: "Test".to_string(),
        surname: "Account".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        birthdate: "1990-01-01".to_string(),
    }
}

/// All services wired over in-memory stores
pub struct Fixture {
    pub accounts: Arc<InMemoryAccountRepository>,
    pub roles: Arc<InMemoryRoleRepository>,
    pub sink: Arc<RecordingNotificationSink>,
    pub storage: Arc<InMemoryObjectStorage>,
    pub tokens: Arc<TokenService>,
    pub registration: RegistrationService,
    pub auth: AuthService,
    pub gate: AuthorizationGate,
    pub admin: AdminService,
    pub role_service: RoleService,
    pub profile: ProfileService,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_config(RegistrationConfig::default()).await
    }

    pub async fn with_config(config: RegistrationConfig) -> Self {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let roles = Arc::new(InMemoryRoleRepository::new());
        let sink = Arc::new(RecordingNotificationSink::new());
        let storage = Arc::new(InMemoryObjectStorage::new());
        let tokens = Arc::new(token_service());
        let notifier = Notifier::new(sink.clone());

        let role_service = RoleService::new(roles.clone());
        role_service.seed_defaults().await.unwrap();

        Self {
            registration: RegistrationService::new(
                accounts.clone(),
                hasher(),
                OtpGenerator::default(),
                notifier.clone(),
                config.clone(),
            ),
            auth: AuthService::new(accounts.clone(), hasher(), tokens.clone()),
            gate: AuthorizationGate::new(tokens.clone(), roles.clone()),
            admin: AdminService::new(accounts.clone(), hasher(), notifier, config.password_min_length),
            profile: ProfileService::new(accounts.clone(), storage.clone(), MAX_UPLOAD),
            role_service,
            accounts,
            roles,
            sink,
            storage,
            tokens,
        }
    }

    /// Store an approved account whose password is `password`
    pub async fn seed_account(&self, email: &str, password: &str, role: Role) -> Account {
        let hash = hasher().hash(password).await.unwrap();
        let account = Account::provisioned(details(email, &hash), role);
        match self.accounts.create(account).await {
            Ok(account) => account,
            Err(e) => panic!("seeding {email} failed: {e}"),
        }
    }

    pub async fn account(&self, email: &str) -> Account {
        match self.accounts.find_by_email(email).await {
            Ok(Some(account)) => account,
            other => panic!("expected account {email}, got {other:?}"),
        }
    }

    pub async fn role_count(&self) -> usize {
        self.roles.list().await.unwrap().len()
    }
}

/// Every default role record exists
pub fn default_role_names() -> Vec<String> {
    RoleRecord::defaults().into_iter().map(|r| r.name).collect()
}
