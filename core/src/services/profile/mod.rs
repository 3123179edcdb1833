//! Self-service profile access and picture upload

mod service;

pub use service::ProfileService;
