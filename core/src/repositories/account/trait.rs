//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::{Account, ApprovalStatus, Role};
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
///
/// Implementations map store failures to [`DomainError::Internal`] and
/// uniqueness violations to [`DomainError::Conflict`].
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by its normalised email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// All accounts currently in `status`, oldest first
    async fn find_by_status(&self, status: ApprovalStatus) -> Result<Vec<Account>, DomainError>;

    /// All accounts holding any of `roles`
    async fn find_by_roles(&self, roles: &[Role]) -> Result<Vec<Account>, DomainError>;

    /// Every account, ordered by account number
    async fn list(&self) -> Result<Vec<Account>, DomainError>;

    /// Insert a new account
    ///
    /// When `account.account_no` is `None` the store assigns the next number
    /// (highest existing + 1, or [`ACCOUNT_NO_BASE`](crate::domain::ACCOUNT_NO_BASE)
    /// for an empty store) as part of the insert.
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account including its account number
    /// * `Err(DomainError::Conflict)` - Email or account number already taken
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Overwrite an account only if its stored status still equals `expected`
    ///
    /// This is the only way an account is written back. Status transitions
    /// pass the status they moved away from; other edits pass the status
    /// they read (see [`save`](Self::save)).
    ///
    /// # Returns
    /// * `Ok(true)` - Written
    /// * `Ok(false)` - The account is gone or another writer changed its status first
    /// * `Err(DomainError::Conflict)` - The email belongs to another account
    async fn update_if_status(
        &self,
        account: &Account,
        expected: ApprovalStatus,
    ) -> Result<bool, DomainError>;

    /// Write back an edit that leaves the status as it was read
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - The status moved (or the account was
    ///   deleted) since it was read; nothing was written
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        if self
            .update_if_status(account, account.approval_status)
            .await?
        {
            return Ok(());
        }
        Err(DomainError::conflict(
            "Account was changed by another request, try again",
        ))
    }

    /// Delete an account
    ///
    /// # Returns
    /// * `Ok(true)` - Account was deleted
    /// * `Ok(false)` - Account not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
