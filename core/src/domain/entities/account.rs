//! Account entity and its verification/approval lifecycle.
//!
//! ```text
//! unverified --confirm_email--> pending --approve--> approved
//!      |                           \----reject----> rejected
//!      \--confirm_email (no admin step)--> approved
//! ```
//!
//! `approved` and `rejected` are terminal. An approved account may be flagged
//! `expired`, after which its email can be registered again.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::one_time_code::OneTimeCode;
use crate::domain::value_objects::StoredObject;
use crate::errors::{AuthError, ValidationError};

/// Account number handed to the first account in an empty store
pub const ACCOUNT_NO_BASE: i64 = 1000;

/// Position of an account in the approval lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Registered, email not yet confirmed
    Unverified,
    /// Email confirmed, waiting for an administrator
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Unverified => "unverified",
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }

    /// Every move the lifecycle permits, whoever performs it
    pub fn can_transition_to(self, next: ApprovalStatus) -> bool {
        use ApprovalStatus::*;
        matches!(
            (self, next),
            (Unverified, Pending) | (Unverified, Approved) | (Pending, Approved) | (Pending, Rejected)
        )
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unverified" => Ok(ApprovalStatus::Unverified),
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            _ => Err(ValidationError::InvalidFormat {
                field: "approval_status".to_string(),
            }),
        }
    }
}

/// Coarse capability tier embedded in issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    #[serde(rename = "user")]
    User,
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "super admin", alias = "super_admin")]
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::SuperAdmin];

    /// Roles allowed onto administrative endpoints
    pub const ADMINISTRATORS: [Role; 2] = [Role::Admin, Role::SuperAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::SuperAdmin => "super admin",
        }
    }

    pub fn is_administrator(&self) -> bool {
        Self::ADMINISTRATORS.contains(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "super admin" | "super_admin" | "superadmin" => Ok(Role::SuperAdmin),
            _ => Err(AuthError::InvalidRole {
                role: s.to_string(),
            }),
        }
    }
}

/// Profile and credential fields supplied when an account is (re)created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub surname: String,
    /// Already normalised
    pub email: String,
    pub password_hash: String,
    pub birthdate: NaiveDate,
}

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,

    /// Sequential number assigned by the store on insert
    pub account_no: Option<i64>,

    pub name: String,
    pub surname: String,

    /// Unique, lower-cased
    pub email: String,

    /// bcrypt hash; plaintext is never stored
    pub password_hash: String,

    pub birthdate: Option<NaiveDate>,
    pub role: Role,
    pub approval_status: ApprovalStatus,

    /// Email ownership confirmed
    pub is_verified: bool,

    /// Stale registration that may be overwritten
    pub expired: bool,

    /// Outstanding one-time code, registration or password reset
    pub verification: Option<OneTimeCode>,

    pub profile_picture: Option<StoredObject>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Self-service registration: `unverified`, carrying `code`
    pub fn register(details: NewAccount, code: OneTimeCode) -> Self {
        let mut account = Self::from_details(details, Role::User, ApprovalStatus::Unverified);
        account.verification = Some(code);
        account
    }

    /// Created by an administrator: verified and approved on the spot
    pub fn provisioned(details: NewAccount, role: Role) -> Self {
        let mut account = Self::from_details(details, role, ApprovalStatus::Approved);
        account.is_verified = true;
        account
    }

    fn from_details(details: NewAccount, role: Role, status: ApprovalStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_no: None,
            name: details.name,
            surname: details.surname,
            email: details.email,
            password_hash: details.password_hash,
            birthdate: Some(details.birthdate),
            role,
            approval_status: status,
            is_verified: false,
            expired: false,
            verification: None,
            profile_picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Approved and not flagged expired
    pub fn is_live(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved && !self.expired
    }

    /// A new registration for this email may overwrite the record
    pub fn can_reregister(&self) -> bool {
        self.expired || self.approval_status == ApprovalStatus::Unverified
    }

    /// Overwrite in place for re-registration. Identity and account number are kept.
    pub fn restart_registration(&mut self, details: NewAccount, code: OneTimeCode) {
        self.name = details.name;
        self.surname = details.surname;
        self.email = details.email;
        self.password_hash = details.password_hash;
        self.birthdate = Some(details.birthdate);
        self.role = Role::User;
        self.approval_status = ApprovalStatus::Unverified;
        self.is_verified = false;
        self.expired = false;
        self.verification = Some(code);
        self.touch();
    }

    pub fn has_outstanding_code(&self) -> bool {
        self.verification.is_some()
    }

    /// Equality is checked before expiry so a wrong code never reports `CodeExpired`
    pub fn check_code(&self, candidate: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        let challenge = match &self.verification {
            Some(challenge) if challenge.matches(candidate) => challenge,
            _ => return Err(AuthError::InvalidCode),
        };
        if challenge.is_expired_at(now) {
            return Err(AuthError::CodeExpired);
        }
        Ok(())
    }

    /// Attach a fresh code, superseding any outstanding one
    pub fn issue_code(&mut self, code: OneTimeCode) {
        self.verification = Some(code);
        self.touch();
    }

    /// Consume the registration code and leave `unverified`
    pub fn confirm_email(&mut self, require_admin_approval: bool) -> Result<ApprovalStatus, AuthError> {
        if self.approval_status != ApprovalStatus::Unverified {
            return Err(AuthError::AlreadyProcessed);
        }
        let next = if require_admin_approval {
            ApprovalStatus::Pending
        } else {
            ApprovalStatus::Approved
        };
        self.advance(next)?;
        self.verification = None;
        self.is_verified = true;
        Ok(next)
    }

    pub fn approve(&mut self, role: Role) -> Result<(), AuthError> {
        if self.approval_status != ApprovalStatus::Pending {
            return Err(AuthError::AlreadyProcessed);
        }
        self.advance(ApprovalStatus::Approved)?;
        self.role = role;
        Ok(())
    }

    pub fn reject(&mut self) -> Result<(), AuthError> {
        if self.approval_status != ApprovalStatus::Pending {
            return Err(AuthError::AlreadyProcessed);
        }
        self.advance(ApprovalStatus::Rejected)
    }

    /// Status edit from the admin user form: only a decision on a pending account
    pub fn set_status(&mut self, next: ApprovalStatus) -> Result<(), AuthError> {
        if next == self.approval_status {
            return Ok(());
        }
        if self.approval_status != ApprovalStatus::Pending {
            return Err(AuthError::InvalidTransition {
                from: self.approval_status.to_string(),
                to: next.to_string(),
            });
        }
        self.advance(next)
    }

    /// New password hash; any outstanding code is consumed
    pub fn replace_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.verification = None;
        self.touch();
    }

    /// Returns the picture that was replaced
    pub fn replace_profile_picture(&mut self, picture: StoredObject) -> Option<StoredObject> {
        let previous = self.profile_picture.replace(picture);
        self.touch();
        previous
    }

    /// Every status change goes through here
    fn advance(&mut self, next: ApprovalStatus) -> Result<(), AuthError> {
        if !self.approval_status.can_transition_to(next) {
            return Err(AuthError::InvalidTransition {
                from: self.approval_status.to_string(),
                to: next.to_string(),
            });
        }
        self.approval_status = next;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
