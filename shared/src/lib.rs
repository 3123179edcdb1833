//! Shared utilities and common types for the AccessGate server
//!
//! - Configuration types loaded from the environment
//! - The error envelope returned by every failing endpoint
//! - Response wrappers
//! - Email normalisation and masking helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    MailConfig, MailProvider, OtpConfig, PasswordConfig, ServerConfig, StorageBackend,
    StorageConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, MessageResponse};
pub use utils::email;
