//! Events API routes
//!
//! Wires the events domain to MongoDB and Cloudinary.

use crate::state::AppState;
use axum::Router;
use domain_events::{
    CloudinaryMediaHost, EventService, MongoBookingRepository, MongoEventRepository,
};
use tracing::info;

/// Create the events router backed by the shared connection manager
pub fn router(state: &AppState) -> eyre::Result<Router> {
    let events = MongoEventRepository::new(state.connections.clone());
    let bookings = MongoBookingRepository::new(state.connections.clone());

    let media = CloudinaryMediaHost::new(state.config.media.clone())
        .map_err(|e| eyre::eyre!("Failed to create media host client: {}", e))?;
    info!(
        cloud = %state.config.media.cloud_name,
        folder = %state.config.media.folder,
        "Image uploads go to Cloudinary"
    );

    let service = EventService::new(events, bookings, media, &state.config.public_base_url);
    Ok(domain_events::router(service))
}
