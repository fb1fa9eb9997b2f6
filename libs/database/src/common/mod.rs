//! Common utilities shared across all database implementations

pub mod error;
pub mod manager;

pub use error::{DatabaseError, DatabaseResult};
pub use manager::{ConnectionManager, Connector, SharedError};
