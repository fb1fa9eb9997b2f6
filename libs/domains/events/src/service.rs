//! Event service layer

use crate::error::{EventError, Result};
use crate::media::MediaHost;
use crate::models::{Booking, CreateBooking, Event, EventSubmission, NewBooking};
use crate::repository::{BookingRepository, EventRepository};
use crate::slug::validate_slug;
use crate::upload::validate_image;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

/// Most recommendations returned for one event.
pub const SIMILAR_EVENTS_LIMIT: usize = 3;

/// Candidates read from storage before dropping partial events.
const SIMILAR_CANDIDATES: usize = 20;

/// Event service coordinating storage and the media host
///
/// Handlers call into this layer; it validates input, enforces the domain rules
/// and orchestrates repository and upload calls.
pub struct EventService {
    events: Arc<dyn EventRepository>,
    bookings: Arc<dyn BookingRepository>,
    media: Arc<dyn MediaHost>,
    public_base_url: String,
}

impl EventService {
    pub fn new(
        events: impl EventRepository + 'static,
        bookings: impl BookingRepository + 'static,
        media: impl MediaHost + 'static,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            events: Arc::new(events),
            bookings: Arc::new(bookings),
            media: Arc::new(media),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Public URL of an event resource, used for the `Location` header.
    pub fn location_of(&self, event: &Event) -> String {
        format!("{}/api/events/{}", self.public_base_url, event.slug)
    }

    /// Fetch one event by its slug
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Event> {
        let slug = validate_slug(slug)?;
        self.events
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| EventError::NotFound {
                slug: slug.to_string(),
            })
    }

    /// All events, newest first
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = self.events.list_all().await?;
        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }

    /// Validate a submitted form, host its image and store the event.
    ///
    /// The image is checked before any field so that a bad upload is reported
    /// first, and nothing is uploaded unless the fields are valid.
    #[instrument(skip(self, submission))]
    pub async fn create(&self, submission: EventSubmission) -> Result<Event> {
        let image = validate_image(submission.image.clone())?;
        let draft = submission.to_draft()?;

        let hosted = self.media.upload(&image).await?;
        debug!(url = %hosted.url, "Image hosted");

        let event = self.events.create(draft.with_image(hosted.url)).await?;
        info!(event_id = %event.id, slug = %event.slug, "Event created");
        Ok(event)
    }

    /// Displayable events sharing a tag with the given one
    #[instrument(skip(self))]
    pub async fn similar(&self, slug: &str) -> Result<Vec<Event>> {
        let event = self.get_by_slug(slug).await?;

        let candidates = self
            .events
            .find_similar(&event.slug, &event.tags, SIMILAR_CANDIDATES)
            .await?;

        Ok(candidates
            .into_iter()
            .filter(Event::is_displayable)
            .take(SIMILAR_EVENTS_LIMIT)
            .collect())
    }

    /// Book a seat on an event for an email address
    #[instrument(skip(self, input))]
    pub async fn book(&self, slug: &str, input: CreateBooking) -> Result<Booking> {
        let input = input.trimmed();
        input.validate()?;
        let event = self.get_by_slug(slug).await?;

        let booking = self
            .bookings
            .create(NewBooking::new(&event, &input.email))
            .await?;
        info!(booking_id = %booking.id, slug = %event.slug, "Booking created");
        Ok(booking)
    }

    /// Number of bookings for an event
    #[instrument(skip(self))]
    pub async fn count_bookings(&self, slug: &str) -> Result<u64> {
        let event = self.get_by_slug(slug).await?;
        self.bookings.count_for_event(event.id).await
    }
}
