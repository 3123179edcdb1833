use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::ApprovalStatus;

/// Signup form as submitted by the client
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    /// `YYYY-MM-DD`
    pub birthdate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationReceipt {
    pub account_id: Uuid,
    pub account_no: Option<i64>,
    pub email: String,
    pub approval_status: ApprovalStatus,
}

/// Result of the owner's existence check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCheck {
    Approved,
    /// The account was not approved and has been removed
    Deleted,
}
