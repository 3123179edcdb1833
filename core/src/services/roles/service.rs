use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::role::RoleRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::RoleRepository;
use crate::services::validation;

#[derive(Debug, Clone, Deserialize)]
pub struct RoleInput {
    pub name: String,
    #[serde(default)]
    pub privileges: Vec<String>,
}

/// Partial update. Privileges, when given, replace the whole set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub privileges: Option<Vec<String>>,
}

pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>) -> Self {
        Self { roles }
    }

    /// Insert each default role whose name is absent. Returns how many were added.
    pub async fn seed_defaults(&self) -> DomainResult<usize> {
        let mut seeded = 0;
        for record in RoleRecord::defaults() {
            if self.roles.find_by_name(&record.name).await?.is_some() {
                continue;
            }
            match self.roles.create(record).await {
                Ok(created) => {
                    tracing::info!(event = "role_seeded", role = %created.name, "Default role created");
                    seeded += 1;
                }
                // Created concurrently by another instance
                Err(DomainError::Conflict { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(seeded)
    }

    pub async fn list(&self) -> DomainResult<Vec<RoleRecord>> {
        self.roles.list().await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<RoleRecord> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role"))
    }

    pub async fn create(&self, input: RoleInput) -> DomainResult<RoleRecord> {
        let name = validation::required("name", &input.name)?;
        let record = self
            .roles
            .create(RoleRecord::new(name, clean(input.privileges)))
            .await?;
        tracing::info!(event = "role_created", role = %record.name, "Role created");
        Ok(record)
    }

    pub async fn update(&self, id: Uuid, update: RoleUpdate) -> DomainResult<RoleRecord> {
        let mut record = self.get(id).await?;
        if let Some(name) = &update.name {
            record.name = validation::required("name", name)?;
        }
        if let Some(privileges) = update.privileges {
            record.privileges = clean(privileges);
        }
        record.touch();

        let record = self.roles.update(record).await?;
        tracing::info!(event = "role_updated", role = %record.name, "Role updated");
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.roles.delete(id).await? {
            return Err(DomainError::not_found("Role"));
        }
        tracing::info!(event = "role_deleted", role_id = %id, "Role deleted");
        Ok(())
    }
}

fn clean(privileges: Vec<String>) -> BTreeSet<String> {
    privileges
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
