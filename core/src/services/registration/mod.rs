//! Registration and verification lifecycle
//!
//! Drives an account from self-service signup through email confirmation, and
//! owns the password reset challenge. Every status change is written with a
//! conditional update keyed on the status it was read in, so two concurrent
//! requests cannot both move the same account.

mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::RegistrationConfig;
pub use service::RegistrationService;
pub use types::{AccountCheck, RegistrationReceipt, RegistrationRequest};
