//! HTTP surface of the AccessGate backend
//!
//! Routes, DTOs and middleware sit on top of the services in `ag_core`.
//! [`app::create_app`] assembles the actix application from an [`app::AppState`].

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState, Collaborators};
pub use handlers::error::ApiError;
