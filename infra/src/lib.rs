//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the core crate defines:
//!
//! - **Database**: MySQL account and role repositories using SQLx, plus the
//!   connection pool and table bootstrap
//! - **Mail**: notification sinks (a logging mock and a transactional email
//!   HTTP API client)
//! - **Storage**: profile pictures on the local filesystem

use ag_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email delivery
pub mod mail;

/// Object storage for uploads
pub mod storage;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider rejected a message
    #[error("Mail delivery error: {0}")]
    Mail(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::internal(error)
    }
}
