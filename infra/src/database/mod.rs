//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and health checks
//! - Table bootstrap for the accounts and roles collections
//! - Repository implementations

pub mod connection;
pub mod mysql;
pub mod schema;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlAccountRepository, MySqlRoleRepository};
