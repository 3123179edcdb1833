//! # AccessGate Core
//!
//! Domain layer for the AccessGate backend: account and role entities, the
//! error taxonomy, repository interfaces with in-memory implementations, and
//! the services that run registration, sign-in and authorization.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult};
