//! Domain entities representing core business objects.

pub mod account;
pub mod one_time_code;
pub mod role;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use account::{Account, ApprovalStatus, NewAccount, Role, ACCOUNT_NO_BASE};
pub use one_time_code::OneTimeCode;
pub use role::{privileges, RoleRecord};
pub use token::Claims;
