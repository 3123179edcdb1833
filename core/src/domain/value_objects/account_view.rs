//! Public projection of an account.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::{Account, ApprovalStatus, Role};

/// Account fields safe to return to clients. The password hash and any
/// outstanding one-time code are never part of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountView {
    pub id: Uuid,
    pub account_no: Option<i64>,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub birthdate: Option<NaiveDate>,
    pub role: Role,
    pub approval_status: ApprovalStatus,
    pub is_verified: bool,
    pub expired: bool,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            account_no: account.account_no,
            name: account.name.clone(),
            surname: account.surname.clone(),
            email: account.email.clone(),
            birthdate: account.birthdate,
            role: account.role,
            approval_status: account.approval_status,
            is_verified: account.is_verified,
            expired: account.expired,
            profile_picture: account.profile_picture.as_ref().map(|p| p.url.clone()),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self::from(&account)
    }
}
