//! Database library providing lazily established, shared connections.
//!
//! The [`ConnectionManager`] owns the lifecycle of a single connection handle: it is
//! created on first use, shared by every caller, and re-attempted after a failure.
//! Backends plug in through the [`Connector`] trait.
//!
//! # Features
//!
//! - `mongodb` - MongoDB connector, configuration and health checks
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All database features
//!
//! # Example
//!
//! ```ignore
//! use database::ConnectionManager;
//! use database::mongodb::{MongoConfig, MongoConnector};
//!
//! let manager = ConnectionManager::new(MongoConnector::new(MongoConfig::from_env()?));
//! let db = manager.acquire().await?;
//! let collection = db.collection::<Document>("events");
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

// Re-exports for convenience
pub use common::{ConnectionManager, Connector, DatabaseError, DatabaseResult, SharedError};
