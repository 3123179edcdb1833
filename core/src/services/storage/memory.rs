use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::value_objects::StoredObject;
use crate::errors::DomainResult;

use super::{extension_for, ObjectStorage};

/// Keeps objects in memory under `memory://<reference>` URLs
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStorage {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, reference: &str) -> bool {
        self.objects.read().await.contains_key(reference)
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put(
        &self,
        name_hint: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> DomainResult<StoredObject> {
        let extension = extension_for(content_type).unwrap_or("bin");
        let reference = format!("{}-{}.{}", name_hint, Uuid::new_v4().simple(), extension);
        self.objects.write().await.insert(reference.clone(), bytes);
        Ok(StoredObject::new(format!("memory://{reference}"), reference))
    }

    async fn delete(&self, reference: &str) -> DomainResult<()> {
        self.objects.write().await.remove(reference);
        Ok(())
    }
}
