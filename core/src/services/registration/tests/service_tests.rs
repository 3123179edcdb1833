//! Unit tests for the registration lifecycle

use chrono::{Duration, Utc};

use crate::domain::entities::account::{ApprovalStatus, Role, ACCOUNT_NO_BASE};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::AccountRepository;
use crate::services::registration::{AccountCheck, RegistrationConfig};
use crate::services::test_support::{signup, Fixture};

async fn outstanding_code(fixture: &Fixture, email: &str) -> String {
    fixture
        .account(email)
        .await
        .verification
        .expect("code outstanding")
        .code
}

async fn expire_code(fixture: &Fixture, email: &str) {
    let mut account = fixture.account(email).await;
    if let Some(code) = account.verification.as_mut() {
        code.expires_at = Utc::now() - Duration::minutes(1);
    }
    fixture.accounts.save(&account).await.unwrap();
}

#[tokio::test]
async fn test_register_creates_unverified_account_with_code() {
    let fixture = Fixture::new().await;

    let receipt = fixture
        .registration
        .register(signup("Carol@Example.com", "password1"))
        .await
        .unwrap();

    assert_eq!(receipt.email, "carol@example.com");
    assert_eq!(receipt.approval_status, ApprovalStatus::Unverified);
    assert_eq!(receipt.account_no, Some(ACCOUNT_NO_BASE));

    let account = fixture.account("carol@example.com").await;
    assert!(!account.is_verified);
    assert_eq!(account.role, Role::User);
    assert_ne!(account.password_hash, "password1");
    let code = account.verification.unwrap();
    assert_eq!(code.code.len(), 6);
    assert!(code.expires_at > Utc::now());

    assert_eq!(
        fixture.sink.last_code_for("carol@example.com").await,
        Some(code.code)
    );
}

#[tokio::test]
async fn test_account_numbers_increase() {
    let fixture = Fixture::new().await;
    let first = fixture.registration.register(signup("a@example.com", "password1")).await.unwrap();
    let second = fixture.registration.register(signup("b@example.com", "password1")).await.unwrap();

    assert_eq!(first.account_no, Some(ACCOUNT_NO_BASE));
    assert_eq!(second.account_no, Some(ACCOUNT_NO_BASE + 1));
}

#[tokio::test]
async fn test_register_validates_input() {
    let fixture = Fixture::new().await;

    let mut request = signup("not-an-email", "password1");
    assert_eq!(
        fixture.registration.register(request.clone()).await,
        Err(ValidationError::InvalidEmail.into())
    );

    request.email = "ok@example.com".into();
    request.password = "abc".into();
    assert_eq!(
        fixture.registration.register(request.clone()).await,
        Err(ValidationError::PasswordTooShort { min: 6 }.into())
    );

    request.password = "password1".into();
    request.birthdate = "yesterday".into();
    assert_eq!(
        fixture.registration.register(request.clone()).await,
        Err(ValidationError::InvalidDate.into())
    );

    request.birthdate = "1990-01-01".into();
    request.name = " ".into();
    assert_eq!(
        fixture.registration.register(request).await,
        Err(ValidationError::RequiredField { field: "name".into() }.into())
    );
    assert_eq!(fixture.accounts.count().await, 0);
}

#[tokio::test]
async fn test_live_account_blocks_registration() {
    let fixture = Fixture::new().await;
    fixture.seed_account("taken@example.com", "password1", Role::User).await;

    assert_eq!(
        fixture.registration.register(signup("taken@example.com", "password1")).await,
        Err(AuthError::UserAlreadyExists.into())
    );
}

#[tokio::test]
async fn test_pending_account_blocks_registration() {
    let fixture = Fixture::new().await;
    fixture.registration.register(signup("p@example.com", "password1")).await.unwrap();
    let code = outstanding_code(&fixture, "p@example.com").await;
    fixture.registration.verify_email("p@example.com", &code).await.unwrap();

    assert_eq!(
        fixture.registration.register(signup("p@example.com", "password1")).await,
        Err(AuthError::UserAlreadyExists.into())
    );
}

#[tokio::test]
async fn test_reregistration_overwrites_unverified_account() {
    let fixture = Fixture::new().await;
    let first = fixture.registration.register(signup("r@example.com", "password1")).await.unwrap();
    let first_hash = fixture.account("r@example.com").await.password_hash;

    let second = fixture.registration.register(signup("r@example.com", "password2")).await.unwrap();

    assert_eq!(second.account_id, first.account_id);
    assert_eq!(second.account_no, first.account_no);
    assert_eq!(fixture.accounts.count().await, 1);

    let account = fixture.account("r@example.com").await;
    assert_ne!(account.password_hash, first_hash);
    assert!(account.verification.is_some());
    assert_eq!(
        fixture.sink.last_code_for("r@example.com").await,
        account.verification.map(|c| c.code)
    );
    assert_eq!(fixture.sink.sent().await.len(), 2);
}

#[tokio::test]
async fn test_reregistration_allowed_over_expired_account() {
    let fixture = Fixture::new().await;
    let mut stale = fixture.seed_account("old@example.com", "password1", Role::Admin).await;
    stale.expired = true;
    fixture.accounts.save(&stale).await.unwrap();

    let receipt = fixture.registration.register(signup("old@example.com", "password2")).await.unwrap();

    assert_eq!(receipt.account_id, stale.id);
    let account = fixture.account("old@example.com").await;
    assert_eq!(account.approval_status, ApprovalStatus::Unverified);
    assert_eq!(account.role, Role::User);
    assert!(!account.expired);
}

#[tokio::test]
async fn test_verify_moves_to_pending_and_alerts_admins() {
    let fixture = Fixture::new().await;
    fixture.seed_account("boss@example.com", "password1", Role::SuperAdmin).await;
    fixture.seed_account("ops@example.com", "password1", Role::Admin).await;
    fixture.seed_account("peer@example.com", "password1", Role::User).await;
    fixture.registration.register(signup("new@example.com", "password1")).await.unwrap();
    let code = outstanding_code(&fixture, "new@example.com").await;

    let status = fixture.registration.verify_email("New@example.com", &code).await.unwrap();

    assert_eq!(status, ApprovalStatus::Pending);
    let account = fixture.account("new@example.com").await;
    assert!(account.is_verified);
    assert!(account.verification.is_none());

    let recipients = fixture.sink.recipients().await;
    assert!(recipients.contains(&"boss@example.com".to_string()));
    assert!(recipients.contains(&"ops@example.com".to_string()));
    assert!(!recipients.contains(&"peer@example.com".to_string()));
}

#[tokio::test]
async fn test_verify_without_admin_step_approves() {
    let fixture = Fixture::with_config(RegistrationConfig {
        require_admin_approval: false,
        password_min_length: 6,
    })
    .await;
    fixture.registration.register(signup("quick@example.com", "password1")).await.unwrap();
    let code = outstanding_code(&fixture, "quick@example.com").await;

    assert_eq!(
        fixture.registration.verify_email("quick@example.com", &code).await,
        Ok(ApprovalStatus::Approved)
    );
    assert!(fixture.auth.sign_in("quick@example.com", "password1").await.is_ok());
}

#[tokio::test]
async fn test_wrong_code_does_not_mutate() {
    let fixture = Fixture::new().await;
    fixture.registration.register(signup("w@example.com", "password1")).await.unwrap();
    let before = fixture.account("w@example.com").await;
    let wrong = if before.verification.as_ref().map(|c| c.code.as_str()) == Some("000000") {
        "111111"
    } else {
        "000000"
    };

    assert_eq!(
        fixture.registration.verify_email("w@example.com", wrong).await,
        Err(AuthError::InvalidCode.into())
    );
    assert_eq!(fixture.account("w@example.com").await, before);
}

#[tokio::test]
async fn test_unknown_email_reads_as_invalid_code() {
    let fixture = Fixture::new().await;
    assert_eq!(
        fixture.registration.verify_email("ghost@example.com", "123456").await,
        Err(AuthError::InvalidCode.into())
    );
}

#[tokio::test]
async fn test_expired_code_fails_and_is_kept() {
    let fixture = Fixture::new().await;
    fixture.registration.register(signup("bob@example.com", "password1")).await.unwrap();
    let code = outstanding_code(&fixture, "bob@example.com").await;
    expire_code(&fixture, "bob@example.com").await;
    let before = fixture.account("bob@example.com").await;

    assert_eq!(
        fixture.registration.verify_email("bob@example.com", &code).await,
        Err(AuthError::CodeExpired.into())
    );
    assert_eq!(
        fixture.registration.verify_email("bob@example.com", &code).await,
        Err(AuthError::CodeExpired.into())
    );
    assert_eq!(fixture.account("bob@example.com").await, before);
}

#[tokio::test]
async fn test_code_cannot_be_used_twice() {
    let fixture = Fixture::new().await;
    fixture.registration.register(signup("twice@example.com", "password1")).await.unwrap();
    let code = outstanding_code(&fixture, "twice@example.com").await;

    fixture.registration.verify_email("twice@example.com", &code).await.unwrap();
    assert_eq!(
        fixture.registration.verify_email("twice@example.com", &code).await,
        Err(AuthError::InvalidCode.into())
    );
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let fixture = Fixture::new().await;
    assert_eq!(
        fixture.registration.forgot_password("ghost@example.com").await,
        Err(DomainError::not_found("Account"))
    );
}

#[tokio::test]
async fn test_reset_code_check_does_not_consume() {
    let fixture = Fixture::new().await;
    fixture.seed_account("reset@example.com", "password1", Role::User).await;
    fixture.registration.forgot_password("reset@example.com").await.unwrap();
    let code = outstanding_code(&fixture, "reset@example.com").await;
    assert_eq!(
        fixture.sink.last_code_for("reset@example.com").await,
        Some(code.clone())
    );

    fixture.registration.verify_reset_code("reset@example.com", &code).await.unwrap();
    fixture.registration.verify_reset_code("reset@example.com", &code).await.unwrap();
    assert_eq!(outstanding_code(&fixture, "reset@example.com").await, code);
}

#[tokio::test]
async fn test_reset_password_replaces_hash_and_clears_code() {
    let fixture = Fixture::new().await;
    fixture.seed_account("reset@example.com", "password1", Role::User).await;
    fixture.registration.forgot_password("reset@example.com").await.unwrap();
    let code = outstanding_code(&fixture, "reset@example.com").await;

    fixture
        .registration
        .reset_password("reset@example.com", &code, "new-password")
        .await
        .unwrap();

    assert!(fixture.account("reset@example.com").await.verification.is_none());
    assert!(fixture.auth.sign_in("reset@example.com", "new-password").await.is_ok());
    assert_eq!(
        fixture.auth.sign_in("reset@example.com", "password1").await.map(|_| ()),
        Err(AuthError::InvalidCredentials.into())
    );
}

#[tokio::test]
async fn test_reset_password_rechecks_code() {
    let fixture = Fixture::new().await;
    fixture.seed_account("reset@example.com", "password1", Role::User).await;
    fixture.registration.forgot_password("reset@example.com").await.unwrap();
    let code = outstanding_code(&fixture, "reset@example.com").await;
    fixture.registration.verify_reset_code("reset@example.com", &code).await.unwrap();
    expire_code(&fixture, "reset@example.com").await;

    assert_eq!(
        fixture
            .registration
            .reset_password("reset@example.com", &code, "new-password")
            .await,
        Err(AuthError::CodeExpired.into())
    );
    assert!(fixture.auth.sign_in("reset@example.com", "new-password").await.is_err());
}

#[tokio::test]
async fn test_check_account_deletes_unapproved() {
    let fixture = Fixture::new().await;
    fixture.registration.register(signup("idle@example.com", "password1")).await.unwrap();
    fixture.seed_account("live@example.com", "password1", Role::User).await;

    assert_eq!(
        fixture.registration.check_account("idle@example.com").await,
        Ok(AccountCheck::Deleted)
    );
    assert!(fixture.accounts.find_by_email("idle@example.com").await.unwrap().is_none());

    assert_eq!(
        fixture.registration.check_account("live@example.com").await,
        Ok(AccountCheck::Approved)
    );
    assert_eq!(
        fixture.registration.check_account("idle@example.com").await,
        Err(DomainError::not_found("Account"))
    );
}
