//! MongoDB implementations of the event and booking repositories
//!
//! Both repositories acquire the database through the shared connection manager on
//! every call and ensure their indexes once per process, after the first successful
//! acquisition.

use crate::error::{EventError, Result, is_duplicate_key};
use crate::models::{Booking, Event, NewBooking, NewEvent};
use crate::repository::{BookingRepository, EventRepository};
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use database::mongodb::MongoConnectionManager;
use futures::TryStreamExt;
use mongodb::bson::serde_helpers::{chrono_datetime_as_bson_datetime, uuid_1_as_binary};
use mongodb::bson::{self, doc};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const EVENTS_COLLECTION: &str = "events";
const BOOKINGS_COLLECTION: &str = "bookings";

/// Current time at the millisecond precision BSON dates keep, so a created entity
/// matches what later reads return.
fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Stored shape of an event. Timestamps are BSON dates so they sort chronologically;
/// missing text fields decode as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDocument {
    #[serde(rename = "_id", with = "uuid_1_as_binary")]
    id: Uuid,
    slug: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    venue: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    mode: String,
    #[serde(default)]
    audience: String,
    #[serde(default)]
    agenda: Vec<String>,
    #[serde(default)]
    organizer: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

impl From<Event> for EventDocument {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            slug: event.slug,
            title: event.title,
            description: event.description,
            overview: event.overview,
            image: event.image,
            venue: event.venue,
            location: event.location,
            date: event.date,
            time: event.time,
            mode: event.mode,
            audience: event.audience,
            agenda: event.agenda,
            organizer: event.organizer,
            tags: event.tags,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id,
            slug: doc.slug,
            title: doc.title,
            description: doc.description,
            overview: doc.overview,
            image: doc.image,
            venue: doc.venue,
            location: doc.location,
            date: doc.date,
            time: doc.time,
            mode: doc.mode,
            audience: doc.audience,
            agenda: doc.agenda,
            organizer: doc.organizer,
            tags: doc.tags,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingDocument {
    #[serde(rename = "_id", with = "uuid_1_as_binary")]
    id: Uuid,
    #[serde(with = "uuid_1_as_binary")]
    event_id: Uuid,
    slug: String,
    email: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDocument {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            event_id: booking.event_id,
            slug: booking.slug,
            email: booking.email,
            created_at: booking.created_at,
        }
    }
}

impl From<BookingDocument> for Booking {
    fn from(doc: BookingDocument) -> Self {
        Self {
            id: doc.id,
            event_id: doc.event_id,
            slug: doc.slug,
            email: doc.email,
            created_at: doc.created_at,
        }
    }
}

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    connections: Arc<MongoConnectionManager>,
    indexes: Arc<OnceCell<()>>,
}

impl MongoEventRepository {
    pub fn new(connections: Arc<MongoConnectionManager>) -> Self {
        Self {
            connections,
            indexes: Arc::new(OnceCell::new()),
        }
    }

    /// Acquire the collection, creating indexes on first use.
    async fn collection(&self) -> Result<Collection<EventDocument>> {
        let database = self.connections.acquire().await?;
        let collection = database.collection::<EventDocument>(EVENTS_COLLECTION);
        self.indexes
            .get_or_try_init(|| Self::create_indexes(&collection))
            .await?;
        Ok(collection)
    }

    async fn create_indexes(collection: &Collection<EventDocument>) -> Result<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "slug": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("slug_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
            IndexModel::builder().keys(doc! { "tags": 1 }).build(),
        ];

        collection.create_indexes(indexes).await?;
        info!(collection = EVENTS_COLLECTION, "Indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        let collection = self.collection().await?;
        let found = collection.find_one(doc! { "slug": slug }).await?;
        Ok(found.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Event>> {
        let collection = self.collection().await?;
        let documents: Vec<EventDocument> = collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        debug!(count = documents.len(), "Listed events");
        Ok(documents.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, event), fields(slug = %event.slug()))]
    async fn create(&self, event: NewEvent) -> Result<Event> {
        event.validate()?;
        let collection = self.collection().await?;

        let event = event.into_event(Uuid::now_v7(), stored_now());
        let document = EventDocument::from(event.clone());

        match collection.insert_one(&document).await {
            Ok(_) => {
                info!(event_id = %event.id, "Event stored");
                Ok(event)
            }
            Err(e) if is_duplicate_key(&e) => Err(EventError::DuplicateSlug(event.slug)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, tags))]
    async fn find_similar(&self, slug: &str, tags: &[String], limit: usize) -> Result<Vec<Event>> {
        if tags.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let collection = self.collection().await?;
        let documents: Vec<EventDocument> = collection
            .find(doc! { "slug": { "$ne": slug }, "tags": { "$in": tags } })
            .sort(doc! { "createdAt": -1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?
            .try_collect()
            .await?;

        Ok(documents.into_iter().map(Event::from).collect())
    }
}

/// MongoDB-based booking repository
#[derive(Clone)]
pub struct MongoBookingRepository {
    connections: Arc<MongoConnectionManager>,
    indexes: Arc<OnceCell<()>>,
}

impl MongoBookingRepository {
    pub fn new(connections: Arc<MongoConnectionManager>) -> Self {
        Self {
            connections,
            indexes: Arc::new(OnceCell::new()),
        }
    }

    async fn collection(&self) -> Result<Collection<BookingDocument>> {
        let database = self.connections.acquire().await?;
        let collection = database.collection::<BookingDocument>(BOOKINGS_COLLECTION);
        self.indexes
            .get_or_try_init(|| Self::create_indexes(&collection))
            .await?;
        Ok(collection)
    }

    async fn create_indexes(collection: &Collection<BookingDocument>) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "eventId": 1, "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("event_email_unique".to_string())
                    .build(),
            )
            .build();

        collection.create_index(index).await?;
        info!(collection = BOOKINGS_COLLECTION, "Indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    #[instrument(skip(self, booking), fields(event_id = %booking.event_id))]
    async fn create(&self, booking: NewBooking) -> Result<Booking> {
        let collection = self.collection().await?;
        let booking = booking.into_booking(Uuid::now_v7(), stored_now());

        match collection
            .insert_one(BookingDocument::from(booking.clone()))
            .await
        {
            Ok(_) => {
                info!(booking_id = %booking.id, "Booking stored");
                Ok(booking)
            }
            Err(e) if is_duplicate_key(&e) => Err(EventError::DuplicateBooking),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn count_for_event(&self, event_id: Uuid) -> Result<u64> {
        let collection = self.collection().await?;
        let count = collection
            .count_documents(doc! { "eventId": bson::Uuid::from(event_id) })
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        let now = Utc::now();
        Event {
            id: Uuid::now_v7(),
            slug: "rustconf-2025".into(),
            title: "RustConf".into(),
            description: String::new(),
            overview: String::new(),
            image: "https://cdn.example.com/a.png".into(),
            venue: String::new(),
            location: String::new(),
            date: String::new(),
            time: String::new(),
            mode: String::new(),
            audience: String::new(),
            agenda: vec![],
            organizer: String::new(),
            tags: vec!["rust".into()],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_event_document_stores_native_bson_types() {
        let event = sample_event();
        let stored = bson::to_document(&EventDocument::from(event.clone())).unwrap();

        assert!(matches!(stored.get("_id"), Some(bson::Bson::Binary(_))));
        assert!(matches!(stored.get("createdAt"), Some(bson::Bson::DateTime(_))));

        let restored: EventDocument = bson::from_document(stored).unwrap();
        let restored = Event::from(restored);
        assert_eq!(restored.id, event.id);
        assert_eq!(
            restored.created_at.timestamp_millis(),
            event.created_at.timestamp_millis()
        );
    }

    #[test]
    fn test_stored_timestamps_survive_a_bson_round_trip_unchanged() {
        let mut event = sample_event();
        event.created_at = stored_now();
        event.updated_at = event.created_at;
        assert_eq!(event.created_at.timestamp_subsec_nanos() % 1_000_000, 0);

        let stored = bson::to_document(&EventDocument::from(event.clone())).unwrap();
        let restored = Event::from(bson::from_document::<EventDocument>(stored).unwrap());

        assert_eq!(restored.created_at, event.created_at);
        assert_eq!(restored.updated_at, event.updated_at);
    }

    #[test]
    fn test_partial_document_decodes_with_empty_fields() {
        let id = Uuid::now_v7();
        let partial = doc! {
            "_id": bson::Uuid::from(id),
            "slug": "partial",
            "createdAt": bson::DateTime::now(),
            "updatedAt": bson::DateTime::now(),
        };

        let event = Event::from(bson::from_document::<EventDocument>(partial).unwrap());
        assert_eq!(event.id, id);
        assert!(event.title.is_empty());
        assert!(event.tags.is_empty());
        assert!(!event.is_displayable());
    }
}
