//! Unit tests for administrative operations

use uuid::Uuid;

use crate::domain::entities::account::{ApprovalStatus, Role};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::services::admin::{CreateUserRequest, UpdateUserRequest};
use crate::services::test_support::{signup, Fixture};

/// Registered and email-confirmed, waiting for a decision
async fn pending(fixture: &Fixture, email: &str) -> Uuid {
    let receipt = fixture.registration.register(signup(email, "password1")).await.unwrap();
    let code = fixture.account(email).await.verification.unwrap().code;
    fixture.registration.verify_email(email, &code).await.unwrap();
    receipt.account_id
}

fn create_request(email: &str, role: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: "Made".into(),
        surname: "ByAdmin".into(),
        email: email.into(),
        password: "password1".into(),
        birthdate: "1980-12-31".into(),
        role: role.into(),
    }
}

#[tokio::test]
async fn test_approve_assigns_role_and_notifies() {
    let fixture = Fixture::new().await;
    let id = pending(&fixture, "p@example.com").await;

    let view = fixture.admin.approve(id, Some("admin")).await.unwrap();

    assert_eq!(view.approval_status, ApprovalStatus::Approved);
    assert_eq!(view.role, Role::Admin);
    let last = fixture.sink.sent().await.pop().unwrap();
    assert_eq!(last.to, "p@example.com");
    assert_eq!(last.subject, "Registration approved");
}

#[tokio::test]
async fn test_approve_without_role_keeps_current() {
    let fixture = Fixture::new().await;
    let id = pending(&fixture, "p@example.com").await;

    let view = fixture.admin.approve(id, None).await.unwrap();
    assert_eq!(view.role, Role::User);
}

#[tokio::test]
async fn test_second_approval_is_already_processed() {
    let fixture = Fixture::new().await;
    let id = pending(&fixture, "p@example.com").await;
    fixture.admin.approve(id, Some("user")).await.unwrap();

    assert_eq!(
        fixture.admin.approve(id, Some("super admin")).await,
        Err(AuthError::AlreadyProcessed.into())
    );
    let account = fixture.account("p@example.com").await;
    assert_eq!(account.approval_status, ApprovalStatus::Approved);
    assert_eq!(account.role, Role::User);
}

#[tokio::test]
async fn test_unverified_account_cannot_be_approved() {
    let fixture = Fixture::new().await;
    let receipt = fixture.registration.register(signup("u@example.com", "password1")).await.unwrap();

    assert_eq!(
        fixture.admin.approve(receipt.account_id, None).await,
        Err(AuthError::AlreadyProcessed.into())
    );
}

#[tokio::test]
async fn test_approve_checks_role_then_existence() {
    let fixture = Fixture::new().await;

    assert_eq!(
        fixture.admin.approve(Uuid::new_v4(), Some("owner")).await,
        Err(AuthError::InvalidRole { role: "owner".into() }.into())
    );
    assert_eq!(
        fixture.admin.approve(Uuid::new_v4(), Some("user")).await,
        Err(DomainError::not_found("Account"))
    );
}

#[tokio::test]
async fn test_reject_then_approve() {
    let fixture = Fixture::new().await;
    let id = pending(&fixture, "p@example.com").await;

    let view = fixture.admin.reject(id).await.unwrap();
    assert_eq!(view.approval_status, ApprovalStatus::Rejected);
    assert_eq!(
        fixture.sink.sent().await.pop().map(|m| m.subject),
        Some("Registration rejected".to_string())
    );

    assert_eq!(fixture.admin.approve(id, None).await, Err(AuthError::AlreadyProcessed.into()));
    assert_eq!(fixture.admin.reject(id).await, Err(AuthError::AlreadyProcessed.into()));
    assert!(fixture.admin.list_registration_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_user_is_approved_and_verified() {
    let fixture = Fixture::new().await;
    fixture.seed_account("first@example.com", "password1", Role::SuperAdmin).await;

    let view = fixture
        .admin
        .create_user(create_request("Made@Example.com", "admin"))
        .await
        .unwrap();

    assert_eq!(view.email, "made@example.com");
    assert_eq!(view.role, Role::Admin);
    assert_eq!(view.approval_status, ApprovalStatus::Approved);
    assert!(view.is_verified);
    assert_eq!(view.account_no, Some(1001));
    assert!(fixture.auth.sign_in("made@example.com", "password1").await.is_ok());
}

#[tokio::test]
async fn test_create_user_rejects_duplicates_and_bad_roles() {
    let fixture = Fixture::new().await;
    fixture.seed_account("taken@example.com", "password1", Role::User).await;

    assert_eq!(
        fixture.admin.create_user(create_request("taken@example.com", "user")).await,
        Err(AuthError::UserAlreadyExists.into())
    );
    assert_eq!(
        fixture.admin.create_user(create_request("new@example.com", "root")).await,
        Err(AuthError::InvalidRole { role: "root".into() }.into())
    );
    assert_eq!(
        fixture.admin.create_user(create_request("new@example.com", "")).await,
        Err(ValidationError::RequiredField { field: "role".into() }.into())
    );
}

#[tokio::test]
async fn test_update_user_partial() {
    let fixture = Fixture::new().await;
    let account = fixture.seed_account("edit@example.com", "password1", Role::User).await;

    let view = fixture
        .admin
        .update_user(
            account.id,
            UpdateUserRequest {
                surname: Some("Renamed".into()),
                role: Some("admin".into()),
                expired: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(view.name, account.name);
    assert_eq!(view.surname, "Renamed");
    assert_eq!(view.role, Role::Admin);
    assert!(view.expired);
}

#[tokio::test]
async fn test_update_user_password_and_email() {
    let fixture = Fixture::new().await;
    let account = fixture.seed_account("edit@example.com", "password1", Role::User).await;
    fixture.seed_account("other@example.com", "password1", Role::User).await;

    assert_eq!(
        fixture
            .admin
            .update_user(
                account.id,
                UpdateUserRequest {
                    email: Some("other@example.com".into()),
                    ..Default::default()
                },
            )
            .await,
        Err(AuthError::UserAlreadyExists.into())
    );

    fixture
        .admin
        .update_user(
            account.id,
            UpdateUserRequest {
                email: Some("moved@example.com".into()),
                password: Some("password2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(fixture.auth.sign_in("moved@example.com", "password2").await.is_ok());
}

#[tokio::test]
async fn test_update_user_status_follows_transitions() {
    let fixture = Fixture::new().await;
    let id = pending(&fixture, "p@example.com").await;

    let view = fixture
        .admin
        .update_user(
            id,
            UpdateUserRequest {
                approval_status: Some("rejected".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(view.approval_status, ApprovalStatus::Rejected);

    let result = fixture
        .admin
        .update_user(
            id,
            UpdateUserRequest {
                approval_status: Some("approved".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidTransition { .. }))
    ));
}

#[tokio::test]
async fn test_get_and_delete_user() {
    let fixture = Fixture::new().await;
    let account = fixture.seed_account("gone@example.com", "password1", Role::User).await;

    assert_eq!(fixture.admin.get_user(account.id).await.unwrap().email, "gone@example.com");
    assert_eq!(fixture.admin.list_users().await.unwrap().len(), 1);

    fixture.admin.delete_user(account.id).await.unwrap();
    assert_eq!(
        fixture.admin.delete_user(account.id).await,
        Err(DomainError::not_found("Account"))
    );
    assert_eq!(
        fixture.admin.get_user(account.id).await,
        Err(DomainError::not_found("Account"))
    );
}
