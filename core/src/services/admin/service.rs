use std::sync::Arc;

use ag_shared::utils::email::mask;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::account::{Account, ApprovalStatus, NewAccount, Role};
use crate::domain::value_objects::AccountView;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::notification::Notifier;
use crate::services::password::PasswordHasher;
use crate::services::validation;

use super::types::{CreateUserRequest, UpdateUserRequest};

pub struct AdminService {
    accounts: Arc<dyn AccountRepository>,
    hasher: PasswordHasher,
    notifier: Notifier,
    password_min_length: usize,
}

impl AdminService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: PasswordHasher,
        notifier: Notifier,
        password_min_length: usize,
    ) -> Self {
        Self {
            accounts,
            hasher,
            notifier,
            password_min_length,
        }
    }

    /// Accounts waiting for a decision
    pub async fn list_registration_requests(&self) -> DomainResult<Vec<AccountView>> {
        let pending = self.accounts.find_by_status(ApprovalStatus::Pending).await?;
        Ok(pending.iter().map(AccountView::from).collect())
    }

    /// Approve a pending account, optionally assigning a role
    ///
    /// The role is validated before the account is looked up. Without a role
    /// the account keeps the one it has.
    pub async fn approve(&self, id: Uuid, role: Option<&str>) -> DomainResult<AccountView> {
        let requested = match role.map(str::trim).filter(|r| !r.is_empty()) {
            Some(name) => Some(name.parse::<Role>()?),
            None => None,
        };

        let mut account = self.find(id).await?;
        let role = requested.unwrap_or(account.role);
        account.approve(role)?;
        if !self
            .accounts
            .update_if_status(&account, ApprovalStatus::Pending)
            .await?
        {
            return Err(AuthError::AlreadyProcessed.into());
        }

        tracing::info!(
            event = "registration_approved",
            account_id = %account.id,
            role = %account.role,
            "Registration approved"
        );
        self.notifier.registration_approved(&account).await;
        Ok(AccountView::from(account))
    }

    pub async fn reject(&self, id: Uuid) -> DomainResult<AccountView> {
        let mut account = self.find(id).await?;
        account.reject()?;
        if !self
            .accounts
            .update_if_status(&account, ApprovalStatus::Pending)
            .await?
        {
            return Err(AuthError::AlreadyProcessed.into());
        }

        tracing::info!(
            event = "registration_rejected",
            account_id = %account.id,
            "Registration rejected"
        );
        self.notifier.registration_rejected(&account).await;
        Ok(AccountView::from(account))
    }

    pub async fn list_users(&self) -> DomainResult<Vec<AccountView>> {
        let accounts = self.accounts.list().await?;
        Ok(accounts.iter().map(AccountView::from).collect())
    }

    pub async fn get_user(&self, id: Uuid) -> DomainResult<AccountView> {
        self.find(id).await.map(AccountView::from)
    }

    /// Create an approved, verified account
    pub async fn create_user(&self, request: CreateUserRequest) -> DomainResult<AccountView> {
        let name = validation::required("name", &request.name)?;
        let surname = validation::required("surname", &request.surname)?;
        let email = validation::email_address(&request.email)?;
        validation::password(&request.password, self.password_min_length)?;
        let birthdate = validation::birthdate(&request.birthdate)?;
        let role: Role = validation::required("role", &request.role)?.parse()?;

        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let details = NewAccount {
            name,
            surname,
            email,
            password_hash: self.hasher.hash(&request.password).await?,
            birthdate,
        };
        let account = self
            .accounts
            .create(Account::provisioned(details, role))
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } => AuthError::UserAlreadyExists.into(),
                other => other,
            })?;

        tracing::info!(
            event = "user_created",
            account_id = %account.id,
            role = %account.role,
            email = %mask(&account.email),
            "Account created by administrator"
        );
        Ok(AccountView::from(account))
    }

    /// Apply a partial update
    ///
    /// A status change is only accepted as a decision on a pending account,
    /// and is written conditionally like the approve and reject operations.
    pub async fn update_user(&self, id: Uuid, request: UpdateUserRequest) -> DomainResult<AccountView> {
        let mut account = self.find(id).await?;
        let previous_status = account.approval_status;

        if let Some(name) = &request.name {
            account.name = validation::required("name", name)?;
        }
        if let Some(surname) = &request.surname {
            account.surname = validation::required("surname", surname)?;
        }
        if let Some(email) = &request.email {
            let email = validation::email_address(email)?;
            if email != account.email {
                if let Some(other) = self.accounts.find_by_email(&email).await? {
                    if other.id != account.id {
                        return Err(AuthError::UserAlreadyExists.into());
                    }
                }
                account.email = email;
            }
        }
        if let Some(birthdate) = &request.birthdate {
            account.birthdate = Some(validation::birthdate(birthdate)?);
        }
        if let Some(role) = &request.role {
            account.role = role.trim().parse()?;
        }
        if let Some(status) = &request.approval_status {
            account.set_status(status.trim().parse()?)?;
        }
        if let Some(expired) = request.expired {
            account.expired = expired;
        }
        if let Some(password) = &request.password {
            validation::password(password, self.password_min_length)?;
            account.password_hash = self.hasher.hash(password).await?;
        }
        account.updated_at = Utc::now();

        if account.approval_status != previous_status {
            if !self.accounts.update_if_status(&account, previous_status).await? {
                return Err(AuthError::AlreadyProcessed.into());
            }
        } else {
            self.accounts.save(&account).await?;
        }

        tracing::info!(event = "user_updated", account_id = %account.id, "Account updated");
        Ok(AccountView::from(account))
    }

    pub async fn delete_user(&self, id: Uuid) -> DomainResult<()> {
        if !self.accounts.delete(id).await? {
            return Err(DomainError::not_found("Account"));
        }
        tracing::info!(event = "user_deleted", account_id = %id, "Account deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Account"))
    }
}
