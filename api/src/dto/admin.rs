use ag_core::services::{CreateUserRequest, RoleInput, RoleUpdate, UpdateUserRequest};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::error::ApiError;

/// Optional body of the approve call. Without a role the account keeps its current one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApproveUserRequest {
    pub role: Option<String>,
}

impl ApproveUserRequest {
    /// An empty body means no role. Anything else must parse.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| ApiError::validation(format!("Invalid approval body: {}", e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserBody {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub surname: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    #[validate(length(equal = 10))]
    pub birthdate: String,

    #[validate(length(min = 1))]
    pub role: String,
}

impl From<CreateUserBody> for CreateUserRequest {
    fn from(body: CreateUserBody) -> Self {
        Self {
            name: body.name,
            surname: body.surname,
            email: body.email,
            password: body.password,
            birthdate: body.birthdate,
            role: body.role,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserBody {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub password: Option<String>,

    #[validate(length(equal = 10))]
    pub birthdate: Option<String>,

    pub role: Option<String>,
    pub approval_status: Option<String>,
    pub expired: Option<bool>,
}

impl From<UpdateUserBody> for UpdateUserRequest {
    fn from(body: UpdateUserBody) -> Self {
        Self {
            name: body.name,
            surname: body.surname,
            email: body.email,
            password: body.password,
            birthdate: body.birthdate,
            role: body.role,
            approval_status: body.approval_status,
            expired: body.expired,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleBody {
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    #[serde(default)]
    pub privileges: Vec<String>,
}

impl From<RoleBody> for RoleInput {
    fn from(body: RoleBody) -> Self {
        Self {
            name: body.name,
            privileges: body.privileges,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RoleUpdateBody {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,

    pub privileges: Option<Vec<String>>,
}

impl From<RoleUpdateBody> for RoleUpdate {
    fn from(body: RoleUpdateBody) -> Self {
        Self {
            name: body.name,
            privileges: body.privileges,
        }
    }
}
