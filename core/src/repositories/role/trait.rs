//! Role repository trait: role name to privilege set.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::role::RoleRecord;
use crate::errors::DomainError;

/// Repository trait for RoleRecord persistence operations
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RoleRecord>, DomainError>;

    /// Exact, case-sensitive name lookup
    async fn find_by_name(&self, name: &str) -> Result<Option<RoleRecord>, DomainError>;

    /// Every role, ordered by name
    async fn list(&self) -> Result<Vec<RoleRecord>, DomainError>;

    /// # Returns
    /// * `Err(DomainError::Conflict)` - A role with this name exists
    async fn create(&self, role: RoleRecord) -> Result<RoleRecord, DomainError>;

    /// # Returns
    /// * `Err(DomainError::NotFound)` - No role with this id
    /// * `Err(DomainError::Conflict)` - Renamed onto an existing name
    async fn update(&self, role: RoleRecord) -> Result<RoleRecord, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
