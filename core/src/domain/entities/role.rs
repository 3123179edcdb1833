//! Role records mapping a role name to its privileges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::account::Role;

/// Privilege names checked by the authorization gate
pub mod privileges {
    pub const CREATE_USER: &str = "create_user";
    pub const UPDATE_USER: &str = "update_user";
    pub const DELETE_USER: &str = "delete_user";
    pub const MANAGE_ROLES: &str = "manage_roles";
}

/// Stored role with its privilege set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: Uuid,
    /// Unique
    pub name: String,
    pub privileges: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoleRecord {
    pub fn new<I, S>(name: impl Into<String>, privileges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            privileges: privileges.into_iter().map(Into::into).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_privilege(&self, privilege: &str) -> bool {
        self.privileges.contains(privilege)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// The three records seeded into an empty role store
    pub fn defaults() -> Vec<RoleRecord> {
        use privileges::*;
        vec![
            RoleRecord::new(
                Role::SuperAdmin.as_str(),
                [CREATE_USER, DELETE_USER, UPDATE_USER, MANAGE_ROLES],
            ),
            RoleRecord::new(Role::Admin.as_str(), [CREATE_USER, DELETE_USER, UPDATE_USER]),
            RoleRecord::new(Role::User.as_str(), Vec::<String>::new()),
        ]
    }
}
