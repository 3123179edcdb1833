//! Value objects representing immutable domain concepts.

pub mod account_view;
pub mod stored_object;

// Re-export commonly used types
pub use account_view::AccountView;
pub use stored_object::StoredObject;
