//! Repository interfaces for accounts and roles, plus in-memory implementations
//! used by tests and by the memory storage backend.

pub mod account;
pub mod role;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use role::{InMemoryRoleRepository, RoleRepository};
