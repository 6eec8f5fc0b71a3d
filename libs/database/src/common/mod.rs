//! Common utilities shared across all database implementations

pub mod error;
pub mod secret;

pub use error::{DatabaseError, DatabaseResult};
pub use secret::Secret;
