//! Persistence backend and profile picture storage configuration

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

/// Where account and role records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory, lost on restart
    #[default]
    Memory,
    /// MySQL through the configured `DATABASE_URL`
    Mysql,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            "mysql" => Ok(StorageBackend::Mysql),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory profile pictures are written to
    pub upload_dir: String,

    /// Public URL prefix the upload directory is served under
    pub public_base_url: String,

    /// Largest accepted upload in bytes
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            upload_dir: String::from("uploads"),
            public_base_url: String::from("http://127.0.0.1:8080/uploads"),
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env_opt("STORAGE_BACKEND")
                .and_then(|backend| backend.parse().ok())
                .unwrap_or(defaults.backend),
            upload_dir: env_opt("UPLOAD_DIR").unwrap_or(defaults.upload_dir),
            public_base_url: env_opt("UPLOAD_PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            max_upload_bytes: env_or("UPLOAD_MAX_BYTES", defaults.max_upload_bytes),
        }
    }
}
