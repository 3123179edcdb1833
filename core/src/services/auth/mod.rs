//! Authentication service module
//!
//! Credential sign-in. The checks run in a fixed order: credentials, then an
//! outstanding one-time code, then approval status.

mod service;


pub use service::{AuthService, SignInResult};
