//! Profile pictures on the local filesystem, served under a public URL prefix.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use ag_core::domain::value_objects::StoredObject;
use ag_core::errors::{DomainError, DomainResult};
use ag_core::services::storage::{extension_for, ObjectStorage};
use ag_shared::config::StorageConfig;

use crate::InfrastructureError;

#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.upload_dir, &config.public_base_url)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist
    pub async fn prepare(&self) -> Result<(), InfrastructureError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Path for `reference`, refusing anything that is not a plain file name
    fn path_for(&self, reference: &str) -> Option<PathBuf> {
        let plain = !reference.is_empty()
            && !reference.contains(['/', '\\'])
            && reference != "."
            && reference != "..";
        plain.then(|| self.root.join(reference))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(
        &self,
        name_hint: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> DomainResult<StoredObject> {
        let extension = extension_for(content_type).unwrap_or("bin");
        let stem: String = name_hint
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        let reference = format!("{}-{}.{}", stem, Uuid::new_v4().simple(), extension);
        let path = self
            .path_for(&reference)
            .ok_or_else(|| DomainError::internal("Generated an unusable file name"))?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(InfrastructureError::from)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(InfrastructureError::from)?;

        tracing::debug!(reference = %reference, "Upload stored");
        Ok(StoredObject::new(
            format!("{}/{}", self.public_base_url, reference),
            reference,
        ))
    }

    async fn delete(&self, reference: &str) -> DomainResult<()> {
        let Some(path) = self.path_for(reference) else {
            tracing::warn!(reference, "Refusing to delete a path outside the upload directory");
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InfrastructureError::from(e).into()),
        }
    }
}
