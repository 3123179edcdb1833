//! Administrative account operations
//!
//! Registration decisions and user CRUD. Callers are expected to have passed
//! the authorization gate already; this service does not look at principals.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::AdminService;
pub use types::{CreateUserRequest, UpdateUserRequest};
