use serde::{Deserialize, Serialize};

/// Object kept in external storage: where clients fetch it, and the handle used to delete it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub url: String,
    pub reference: String,
}

impl StoredObject {
    pub fn new(url: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reference: reference.into(),
        }
    }
}
