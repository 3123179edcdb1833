//! Registration service implementation

use std::sync::Arc;

use ag_shared::utils::email::{mask, normalize};
use chrono::Utc;

use crate::domain::entities::account::{Account, ApprovalStatus, NewAccount, Role};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::notification::Notifier;
use crate::services::otp::OtpGenerator;
use crate::services::password::PasswordHasher;
use crate::services::validation;

use super::config::RegistrationConfig;
use super::types::{AccountCheck, RegistrationReceipt, RegistrationRequest};

pub struct RegistrationService {
    accounts: Arc<dyn AccountRepository>,
    hasher: PasswordHasher,
    otp: OtpGenerator,
    notifier: Notifier,
    config: RegistrationConfig,
}

impl RegistrationService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: PasswordHasher,
        otp: OtpGenerator,
        notifier: Notifier,
        config: RegistrationConfig,
    ) -> Self {
        Self {
            accounts,
            hasher,
            otp,
            notifier,
            config,
        }
    }

    /// Create an `unverified` account and mail it a registration code
    ///
    /// An existing record for the same email is overwritten in place when it
    /// is still unverified or flagged expired. Any other existing record
    /// fails with `UserAlreadyExists`.
    pub async fn register(&self, request: RegistrationRequest) -> DomainResult<RegistrationReceipt> {
        let name = validation::required("name", &request.name)?;
        let surname = validation::required("surname", &request.surname)?;
        let email = validation::email_address(&request.email)?;
        validation::password(&request.password, self.config.password_min_length)?;
        let birthdate = validation::birthdate(&request.birthdate)?;

        let existing = self.accounts.find_by_email(&email).await?;
        if matches!(&existing, Some(account) if !account.can_reregister()) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let details = NewAccount {
            name,
            surname,
            email: email.clone(),
            password_hash: self.hasher.hash(&request.password).await?,
            birthdate,
        };
        let code = self.otp.registration_code();
        let plain_code = code.code.clone();

        let account = match existing {
            Some(mut account) => {
                let previous = account.approval_status;
                account.restart_registration(details, code);
                if !self.accounts.update_if_status(&account, previous).await? {
                    return Err(AuthError::UserAlreadyExists.into());
                }
                tracing::info!(
                    event = "registration_restarted",
                    account_id = %account.id,
                    email = %mask(&email),
                    "Stale registration overwritten"
                );
                account
            }
            None => {
                let account = self
                    .accounts
                    .create(Account::register(details, code))
                    .await
                    .map_err(|e| match e {
                        DomainError::Conflict { .. } => AuthError::UserAlreadyExists.into(),
                        other => other,
                    })?;
                tracing::info!(
                    event = "registration_created",
                    account_id = %account.id,
                    account_no = ?account.account_no,
                    email = %mask(&email),
                    "Account registered"
                );
                account
            }
        };

        self.notifier
            .registration_code(&account, &plain_code, self.otp.registration_validity_minutes())
            .await;

        Ok(RegistrationReceipt {
            account_id: account.id,
            account_no: account.account_no,
            email: account.email,
            approval_status: account.approval_status,
        })
    }

    /// Consume the registration code
    ///
    /// Moves the account to `pending` and alerts every administrator, or
    /// straight to `approved` when admin approval is disabled.
    pub async fn verify_email(&self, email: &str, code: &str) -> DomainResult<ApprovalStatus> {
        let (mut account, code) = self.challenged_account(email, code).await?;
        account.check_code(&code, Utc::now())?;

        let previous = account.approval_status;
        let next = account.confirm_email(self.config.require_admin_approval)?;
        if !self.accounts.update_if_status(&account, previous).await? {
            return Err(AuthError::AlreadyProcessed.into());
        }

        tracing::info!(
            event = "email_verified",
            account_id = %account.id,
            status = %next,
            "Email ownership confirmed"
        );

        if next == ApprovalStatus::Pending {
            let admins = self.accounts.find_by_roles(&Role::ADMINISTRATORS).await?;
            self.notifier.registration_request(&admins, &account).await;
        } else {
            self.notifier.registration_approved(&account).await;
        }

        Ok(next)
    }

    /// Issue a password reset code, superseding any outstanding code
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = validation::email_address(email)?;
        let mut account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("Account"))?;

        let code = self.otp.reset_code();
        let plain_code = code.code.clone();
        account.issue_code(code);
        self.accounts.save(&account).await?;

        tracing::info!(
            event = "password_reset_requested",
            account_id = %account.id,
            email = %mask(&email),
            "Password reset code issued"
        );

        self.notifier
            .password_reset_code(&account, &plain_code, self.otp.reset_validity_minutes())
            .await;
        Ok(())
    }

    /// Check a reset code without consuming it
    pub async fn verify_reset_code(&self, email: &str, code: &str) -> DomainResult<()> {
        let (account, code) = self.challenged_account(email, code).await?;
        account.check_code(&code, Utc::now())?;
        Ok(())
    }

    /// Replace the password after re-checking the code, then clear the code
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        validation::password(new_password, self.config.password_min_length)?;
        let (mut account, code) = self.challenged_account(email, code).await?;
        account.check_code(&code, Utc::now())?;

        let hash = self.hasher.hash(new_password).await?;
        account.replace_password(hash);
        self.accounts.save(&account).await?;

        tracing::info!(
            event = "password_reset",
            account_id = %account.id,
            "Password replaced"
        );
        Ok(())
    }

    /// Existence check run by the account owner.
    ///
    /// Destructive: an account that is not `approved` is deleted as part of
    /// the check and cannot be recovered.
    pub async fn check_account(&self, email: &str) -> DomainResult<AccountCheck> {
        let email = validation::required("email", email)?;
        let account = self
            .accounts
            .find_by_email(&normalize(&email))
            .await?
            .ok_or_else(|| DomainError::not_found("Account"))?;

        if account.approval_status == ApprovalStatus::Approved {
            return Ok(AccountCheck::Approved);
        }

        self.accounts.delete(account.id).await?;
        tracing::warn!(
            event = "unapproved_account_deleted",
            account_id = %account.id,
            status = %account.approval_status,
            email = %mask(&account.email),
            "Unapproved account removed by owner check"
        );
        Ok(AccountCheck::Deleted)
    }

    /// Account for a code-bearing request. An unknown email reads as a wrong code.
    async fn challenged_account(&self, email: &str, code: &str) -> DomainResult<(Account, String)> {
        let email = validation::required("email", email)?;
        let code = validation::required("code", code)?;
        let account = self
            .accounts
            .find_by_email(&normalize(&email))
            .await?
            .ok_or(AuthError::InvalidCode)?;
        Ok((account, code))
    }
}
