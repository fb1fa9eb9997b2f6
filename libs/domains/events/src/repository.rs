//! Storage traits for events and bookings

use crate::error::Result;
use crate::models::{Booking, Event, NewBooking, NewEvent};
use async_trait::async_trait;
use uuid::Uuid;

/// Repository trait for event storage operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find one event by slug; `None` when it does not exist
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>>;

    /// All events, newest first
    async fn list_all(&self) -> Result<Vec<Event>>;

    /// Persist a new event.
    ///
    /// Fails with `EventError::DuplicateSlug` when the slug is taken.
    async fn create(&self, event: NewEvent) -> Result<Event>;

    /// Events sharing at least one tag with `tags`, excluding `slug`, newest first
    async fn find_similar(&self, slug: &str, tags: &[String], limit: usize) -> Result<Vec<Event>>;
}

/// Repository trait for booking storage operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a booking.
    ///
    /// Fails with `EventError::DuplicateBooking` when the email already booked the event.
    async fn create(&self, booking: NewBooking) -> Result<Booking>;

    async fn count_for_event(&self, event_id: Uuid) -> Result<u64>;
}
