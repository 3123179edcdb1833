//! In-memory implementation of AccountRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::{Account, ApprovalStatus, Role, ACCOUNT_NO_BASE};
use crate::errors::DomainError;

use super::trait_::AccountRepository;

/// Account store kept in process memory
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

fn sorted(mut accounts: Vec<Account>) -> Vec<Account> {
    accounts.sort_by(|a, b| {
        a.account_no
            .cmp(&b.account_no)
            .then(a.created_at.cmp(&b.created_at))
    });
    accounts
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_status(&self, status: ApprovalStatus) -> Result<Vec<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(sorted(
            accounts
                .values()
                .filter(|a| a.approval_status == status)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_roles(&self, roles: &[Role]) -> Result<Vec<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(sorted(
            accounts
                .values()
                .filter(|a| roles.contains(&a.role))
                .cloned()
                .collect(),
        ))
    }

    async fn list(&self) -> Result<Vec<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(sorted(accounts.values().cloned().collect()))
    }

    async fn create(&self, mut account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::conflict("Email already registered"));
        }

        match account.account_no {
            Some(number) if accounts.values().any(|a| a.account_no == Some(number)) => {
                return Err(DomainError::conflict("Account number already assigned"));
            }
            Some(_) => {}
            None => {
                let next = accounts
                    .values()
                    .filter_map(|a| a.account_no)
                    .max()
                    .map(|max| max + 1)
                    .unwrap_or(ACCOUNT_NO_BASE);
                account.account_no = Some(next);
            }
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_if_status(
        &self,
        account: &Account,
        expected: ApprovalStatus,
    ) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|a| a.id != account.id && a.email == account.email)
        {
            return Err(DomainError::conflict("Email already registered"));
        }
        match accounts.get_mut(&account.id) {
            Some(stored) if stored.approval_status == expected => {
                *stored = account.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.accounts.write().await.remove(&id).is_some())
    }
}
