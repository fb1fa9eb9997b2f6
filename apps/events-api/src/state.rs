//! Application state shared by the route builders.

use database::mongodb::MongoConnectionManager;
use std::sync::Arc;

/// Shared application state.
///
/// Cloning is cheap; the connection manager is behind an `Arc` so every
/// repository and probe shares one MongoDB handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Lazily connected MongoDB handle
    pub connections: Arc<MongoConnectionManager>,
}
