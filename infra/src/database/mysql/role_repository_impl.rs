//! MySQL implementation of the RoleRepository trait.
//!
//! Privileges are stored as a JSON array in a text column.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ag_core::domain::entities::role::RoleRecord;
use ag_core::errors::DomainError;
use ag_core::repositories::RoleRepository;

use super::{column_error, is_unique_violation, query_failed};

const COLUMNS: &str = "id, name, privileges, created_at, updated_at";

/// MySQL implementation of RoleRepository
pub struct MySqlRoleRepository {
    pool: MySqlPool,
}

impl MySqlRoleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_role(row: &MySqlRow) -> Result<RoleRecord, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let privileges: String = row
            .try_get("privileges")
            .map_err(|e| column_error("privileges", e))?;

        Ok(RoleRecord {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            privileges: decode_privileges(&privileges)?,
            created_at: row.try_get("created_at").map_err(|e| column_error("created_at", e))?,
            updated_at: row.try_get("updated_at").map_err(|e| column_error("updated_at", e))?,
        })
    }
}

fn encode_privileges(privileges: &BTreeSet<String>) -> Result<String, DomainError> {
    serde_json::to_string(privileges).map_err(DomainError::internal)
}

fn decode_privileges(raw: &str) -> Result<BTreeSet<String>, DomainError> {
    if raw.trim().is_empty() {
        return Ok(BTreeSet::new());
    }
    serde_json::from_str(raw).map_err(|e| column_error("privileges", e))
}

#[async_trait]
impl RoleRepository for MySqlRoleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RoleRecord>, DomainError> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to load role", e))?;
        row.as_ref().map(Self::row_to_role).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<RoleRecord>, DomainError> {
        // BINARY keeps the lookup case-sensitive under case-insensitive collations
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = BINARY ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to load role", e))?;
        row.as_ref().map(Self::row_to_role).transpose()
    }

    async fn list(&self) -> Result<Vec<RoleRecord>, DomainError> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY name");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list roles", e))?;
        rows.iter().map(Self::row_to_role).collect()
    }

    async fn create(&self, role: RoleRecord) -> Result<RoleRecord, DomainError> {
        let query = format!("INSERT INTO roles ({COLUMNS}) VALUES (?, ?, ?, ?, ?)");
        sqlx::query(&query)
            .bind(role.id.to_string())
            .bind(&role.name)
            .bind(encode_privileges(&role.privileges)?)
            .bind(role.created_at)
            .bind(role.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::conflict(format!("Role '{}' already exists", role.name))
                } else {
                    query_failed("Failed to create role", e)
                }
            })?;
        Ok(role)
    }

    async fn update(&self, role: RoleRecord) -> Result<RoleRecord, DomainError> {
        let result = sqlx::query(
            "UPDATE roles SET name = ?, privileges = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&role.name)
        .bind(encode_privileges(&role.privileges)?)
        .bind(role.updated_at)
        .bind(role.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("Role '{}' already exists", role.name))
            } else {
                query_failed("Failed to update role", e)
            }
        })?;

        if result.rows_affected() == 0 && self.find_by_id(role.id).await?.is_none() {
            return Err(DomainError::not_found("Role"));
        }
        Ok(role)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to delete role", e))?;
        Ok(result.rows_affected() > 0)
    }
}
