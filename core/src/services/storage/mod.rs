//! Object storage for profile pictures.

mod memory;

use async_trait::async_trait;

use crate::domain::value_objects::StoredObject;
use crate::errors::DomainResult;

pub use memory::InMemoryObjectStorage;

/// Stores uploaded bytes and hands back a public URL plus a deletable reference
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// `name_hint` seeds the object name; implementations make it unique
    async fn put(
        &self,
        name_hint: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> DomainResult<StoredObject>;

    /// Deleting an unknown reference is not an error
    async fn delete(&self, reference: &str) -> DomainResult<()>;
}

/// File extension for an accepted image content type
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}
