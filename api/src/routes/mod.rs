//! Route handlers
//!
//! - `auth` - registration, verification, sign-in and password reset
//! - `admin` - registration decisions and user management
//! - `roles` - role and privilege management
//! - `user` - the caller's own profile
//! - `health` - liveness and store health

pub mod admin;
pub mod auth;
pub mod health;
pub mod roles;
pub mod user;
