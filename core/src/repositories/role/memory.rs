//! In-memory implementation of RoleRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::role::RoleRecord;
use crate::errors::DomainError;

use super::trait_::RoleRepository;

/// Role store kept in process memory
#[derive(Clone, Default)]
pub struct InMemoryRoleRepository {
    roles: Arc<RwLock<HashMap<Uuid, RoleRecord>>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RoleRecord>, DomainError> {
        Ok(self.roles.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<RoleRecord>, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.values().find(|r| r.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<RoleRecord>, DomainError> {
        let roles = self.roles.read().await;
        let mut list: Vec<RoleRecord> = roles.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn create(&self, role: RoleRecord) -> Result<RoleRecord, DomainError> {
        let mut roles = self.roles.write().await;
        if roles.values().any(|r| r.name == role.name) {
            return Err(DomainError::conflict("Role already exists"));
        }
        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update(&self, role: RoleRecord) -> Result<RoleRecord, DomainError> {
        let mut roles = self.roles.write().await;
        if !roles.contains_key(&role.id) {
            return Err(DomainError::not_found("Role"));
        }
        if roles.values().any(|r| r.id != role.id && r.name == role.name) {
            return Err(DomainError::conflict("Role already exists"));
        }
        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.roles.write().await.remove(&id).is_some())
    }
}
