//! Authorization gate for protected operations
//!
//! Roles travel inside the access token. Privileges do not: they are read
//! from the role store on every check, so an edit to a role applies to the
//! next request.

mod gate;

pub use gate::{AuthorizationGate, Principal, BEARER_PREFIX};
