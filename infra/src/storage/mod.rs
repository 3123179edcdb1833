//! Object storage backends for uploaded files

mod local;

pub use local::LocalObjectStorage;
