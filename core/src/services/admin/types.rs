use serde::Deserialize;

/// Every field is required
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    /// `YYYY-MM-DD`
    pub birthdate: String,
    pub role: String,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub birthdate: Option<String>,
    pub role: Option<String>,
    pub approval_status: Option<String>,
    pub expired: Option<bool>,
}
