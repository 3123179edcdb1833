//! Token service module for JWT management
//!
//! Access tokens are stateless HS256 JWTs carrying account id, email and role.
//! There is no server-side session store, so a token stays valid until it expires.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{IssuedToken, TokenService};
