//! Registration decisions racing through the public service API

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use ag_core::domain::entities::account::{Account, ApprovalStatus, Role};
use ag_core::errors::{AuthError, DomainError};
use ag_core::repositories::{AccountRepository, InMemoryAccountRepository};
use ag_core::services::{
    AdminService, InMemoryObjectStorage, Notifier, OtpGenerator, PasswordHasher, ProfileService,
    RecordingNotificationSink, RegistrationConfig, RegistrationRequest, RegistrationService,
};

struct Harness {
    accounts: Arc<InMemoryAccountRepository>,
    sink: Arc<RecordingNotificationSink>,
    registration: RegistrationService,
    admin: Arc<AdminService>,
}

fn harness() -> Harness {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let sink = Arc::new(RecordingNotificationSink::new());
    let notifier = Notifier::new(sink.clone());
    let config = RegistrationConfig::default();

    Harness {
        registration: RegistrationService::new(
            accounts.clone(),
            PasswordHasher::new(4),
            OtpGenerator::default(),
            notifier.clone(),
            config.clone(),
        ),
        admin: Arc::new(AdminService::new(
            accounts.clone(),
            PasswordHasher::new(4),
            notifier,
            config.password_min_length,
        )),
        accounts,
        sink,
    }
}

async fn pending_account(h: &Harness, email: &str) -> uuid::Uuid {
    let receipt = h
        .registration
        .register(RegistrationRequest {
            name: "Race".to_string(),
            surname: "Condition".to_string(),
            email: email.to_string(),
            password: "race-password".to_string(),
            birthdate: "1991-02-03".to_string(),
        })
        .await
        .unwrap();
    let code = h.sink.last_code_for(email).await.unwrap();
    let status = h.registration.verify_email(email, &code).await.unwrap();
    assert_eq!(status, ApprovalStatus::Pending);
    receipt.account_id
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_approve_and_reject_only_one_wins() {
    let h = harness();
    let id = pending_account(&h, "racer@example.com").await;

    let approve = {
        let admin = h.admin.clone();
        tokio::spawn(async move { admin.approve(id, Some("admin")).await })
    };
    let reject = {
        let admin = h.admin.clone();
        tokio::spawn(async move { admin.reject(id).await })
    };
    let approved = approve.await.unwrap();
    let rejected = reject.await.unwrap();

    assert!(approved.is_ok() != rejected.is_ok(), "exactly one decision must apply");
    let loser = if approved.is_ok() { rejected.err() } else { approved.err() };
    assert!(matches!(
        loser,
        Some(DomainError::Auth(AuthError::AlreadyProcessed))
    ));

    let stored = h.accounts.find_by_id(id).await.unwrap().unwrap();
    if stored.approval_status == ApprovalStatus::Approved {
        assert_eq!(stored.role, Role::Admin);
    } else {
        assert_eq!(stored.approval_status, ApprovalStatus::Rejected);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_concurrent_approvals_apply_once() {
    let h = harness();
    let id = pending_account(&h, "crowd@example.com").await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let admin = h.admin.clone();
            tokio::spawn(async move { admin.approve(id, None).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);

    let stored = h.accounts.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.approval_status, ApprovalStatus::Approved);
    assert_eq!(stored.role, Role::User);
}

/// Approves the account as an admin would, in between another request's read
/// and its write
struct ApprovalLandsMidWrite {
    inner: Arc<InMemoryAccountRepository>,
    armed: AtomicBool,
}

impl ApprovalLandsMidWrite {
    fn new(inner: Arc<InMemoryAccountRepository>) -> Self {
        Self {
            inner,
            armed: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl AccountRepository for ApprovalLandsMidWrite {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_status(&self, status: ApprovalStatus) -> Result<Vec<Account>, DomainError> {
        self.inner.find_by_status(status).await
    }

    async fn find_by_roles(&self, roles: &[Role]) -> Result<Vec<Account>, DomainError> {
        self.inner.find_by_roles(roles).await
    }

    async fn list(&self) -> Result<Vec<Account>, DomainError> {
        self.inner.list().await
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        self.inner.create(account).await
    }

    async fn update_if_status(
        &self,
        account: &Account,
        expected: ApprovalStatus,
    ) -> Result<bool, DomainError> {
        if self.armed.swap(false, Ordering::SeqCst) {
            let mut current = self
                .inner
                .find_by_id(account.id)
                .await?
                .ok_or_else(|| DomainError::not_found("Account"))?;
            current.approve(Role::Admin)?;
            assert!(self
                .inner
                .update_if_status(&current, ApprovalStatus::Pending)
                .await?);
        }
        self.inner.update_if_status(account, expected).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.inner.delete(id).await
    }
}

async fn assert_still_approved(h: &Harness, id: Uuid) {
    let stored = h.accounts.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.approval_status, ApprovalStatus::Approved);
    assert_eq!(stored.role, Role::Admin);
}

#[tokio::test]
async fn test_picture_upload_does_not_undo_concurrent_approval() {
    let h = harness();
    let id = pending_account(&h, "painter@example.com").await;

    let storage = Arc::new(InMemoryObjectStorage::new());
    let profile = ProfileService::new(
        Arc::new(ApprovalLandsMidWrite::new(h.accounts.clone())),
        storage.clone(),
        1024,
    );

    let result = profile.upload_picture(id, "image/png", vec![1, 2, 3]).await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    assert_still_approved(&h, id).await;
    // The stored object is cleaned up when the account write loses
    assert_eq!(storage.len().await, 0);
}

#[tokio::test]
async fn test_reset_code_does_not_undo_concurrent_approval() {
    let h = harness();
    let id = pending_account(&h, "forgetful@example.com").await;

    let registration = RegistrationService::new(
        Arc::new(ApprovalLandsMidWrite::new(h.accounts.clone())),
        PasswordHasher::new(4),
        OtpGenerator::default(),
        Notifier::new(h.sink.clone()),
        RegistrationConfig::default(),
    );
    let mails_before = h.sink.sent().await.len();

    let result = registration.forgot_password("forgetful@example.com").await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    assert_still_approved(&h, id).await;
    let stored = h.accounts.find_by_id(id).await.unwrap().unwrap();
    assert!(stored.verification.is_none());
    assert_eq!(h.sink.sent().await.len(), mails_before);
}
