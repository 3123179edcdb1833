//! MySQL repository implementations

mod account_repository_impl;
mod role_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use role_repository_impl::MySqlRoleRepository;

use ag_core::errors::DomainError;

/// Unique-key violation, reported as a conflict
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

pub(crate) fn query_failed(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    DomainError::internal(format!("{}: {}", context, error))
}

pub(crate) fn column_error(column: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::internal(format!("Failed to read {}: {}", column, error))
}
