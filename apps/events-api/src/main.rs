use axum_helpers::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{MongoConnectionManager, MongoConnector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(url = %config.mongodb.redacted_url(), "Using MongoDB");
    let connections = Arc::new(MongoConnectionManager::new(MongoConnector::new(
        config.mongodb.clone(),
    )));

    // Connect in the background; requests arriving first join the same attempt
    let warmup = connections.clone();
    tokio::spawn(async move {
        match warmup.acquire().await {
            Ok(db) => info!(database = %db.name(), "Connected to MongoDB"),
            Err(e) => warn!(error = %e, "Initial MongoDB connection failed, retrying on next request"),
        }
    });

    let state = AppState {
        config,
        connections,
    };

    let api_routes = api::routes(&state)?;
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.cors_origins)?;

    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::health::router(state.clone()));

    info!("Starting DevEvent API with graceful shutdown (30s timeout)");

    let connections = state.connections.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if connections.is_connected().await
                && let Ok(db) = connections.acquire().await
            {
                info!("Shutting down: closing MongoDB connections");
                db.client().clone().shutdown().await;
                info!("MongoDB connection closed successfully");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("DevEvent API shutdown complete");
    Ok(())
}
