//! Role and privilege management

mod service;

pub use service::{RoleInput, RoleService, RoleUpdate};
