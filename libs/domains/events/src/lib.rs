//! Events Domain
//!
//! Event listings and seat bookings for the DevEvent API:
//! - MongoDB for events and bookings, reached through the shared connection manager
//! - Cloudinary for hosting event images
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Request Flow                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  POST /api/events ──► validate image + fields                │
//! │                           │                                  │
//! │                           ├─► MediaHost (signed upload)      │
//! │                           │                                  │
//! │                           └─► EventRepository ─► MongoDB     │
//! │                                                              │
//! │  GET  /api/events/{slug} ─► validate slug ─► EventRepository │
//! │                                                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod handlers;
pub mod list_input;
pub mod media;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod response;
pub mod service;
pub mod slug;
pub mod upload;

pub use error::{EventError, Result};
pub use handlers::{ApiDoc, router};
pub use list_input::ListInput;
pub use media::{CloudinaryConfig, CloudinaryMediaHost, HostedImage, MediaHost, UploadResponse};
pub use models::{
    Booking, CreateBooking, Event, EventDraft, EventSubmission, NewBooking, NewEvent,
};
pub use crate::mongodb::{MongoBookingRepository, MongoEventRepository};
pub use repository::{BookingRepository, EventRepository};
pub use response::{ApiError, EventEnvelope, Operation};
pub use service::{EventService, SIMILAR_EVENTS_LIMIT};
pub use slug::{slugify, validate_slug};
pub use upload::{ALLOWED_IMAGE_TYPES, ImageUpload, MAX_IMAGE_BYTES};
