//! Event domain models

use crate::error::{EventError, Result};
use crate::list_input::ListInput;
use crate::slug::{slugify, validate_slug};
use crate::upload::ImageUpload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A published event listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,

    /// Public lookup key, unique
    pub slug: String,

    pub title: String,
    pub description: String,
    pub overview: String,

    /// Hosted image URL
    pub image: String,

    pub venue: String,
    pub location: String,

    /// Display date, stored as entered
    pub date: String,

    /// Display time, stored as entered
    pub time: String,

    /// e.g. online, offline, hybrid
    pub mode: String,

    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether every field the detail page renders is present.
    ///
    /// Stored documents may be partial; those stay listable but are not shown as
    /// details or recommendations.
    pub fn is_displayable(&self) -> bool {
        let text_fields = [
            &self.description,
            &self.image,
            &self.overview,
            &self.date,
            &self.time,
            &self.location,
            &self.mode,
            &self.audience,
            &self.organizer,
        ];

        text_fields.iter().all(|field| !field.trim().is_empty())
            && !self.agenda.is_empty()
            && !self.tags.is_empty()
    }
}

/// Validated event fields, before the image has been hosted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventDraft {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub overview: String,
    pub venue: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: String,
    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,
}

impl EventDraft {
    pub fn with_image(self, image: impl Into<String>) -> NewEvent {
        NewEvent {
            draft: self,
            image: image.into(),
        }
    }
}

/// Event data ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub draft: EventDraft,
    pub image: String,
}

impl NewEvent {
    pub fn slug(&self) -> &str {
        &self.draft.slug
    }

    /// Storage-level checks: a hosted image, a title and a well-formed slug.
    pub fn validate(&self) -> Result<()> {
        if self.image.trim().is_empty() {
            return Err(EventError::Validation("Event image is required".to_string()));
        }
        if self.draft.title.trim().is_empty() {
            return Err(EventError::Validation("Title is required".to_string()));
        }
        validate_slug(&self.draft.slug)?;
        Ok(())
    }

    /// Materialize the entity with a store id and creation timestamps.
    pub fn into_event(self, id: Uuid, now: DateTime<Utc>) -> Event {
        let NewEvent { draft, image } = self;
        Event {
            id,
            slug: draft.slug,
            title: draft.title,
            description: draft.description,
            overview: draft.overview,
            image,
            venue: draft.venue,
            location: draft.location,
            date: draft.date,
            time: draft.time,
            mode: draft.mode,
            audience: draft.audience,
            agenda: draft.agenda,
            organizer: draft.organizer,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Raw contents of a create-event form.
///
/// Text fields keep every value received under a name so that repeated fields
/// can be treated as a list.
#[derive(Debug, Clone, Default)]
pub struct EventSubmission {
    pub fields: HashMap<String, Vec<String>>,
    pub image: Option<ImageUpload>,
}

impl EventSubmission {
    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_field(name, value);
        self
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    fn list(&self, name: &str) -> Vec<String> {
        let values = self.fields.get(name).map(Vec::as_slice).unwrap_or_default();
        ListInput::from_form_values(values).normalize()
    }

    /// Validate the text fields into a draft.
    ///
    /// The title is required. An explicit slug must already be well formed;
    /// otherwise one is derived from the title.
    pub fn to_draft(&self) -> Result<EventDraft> {
        let title = self.text("title");
        if title.is_empty() {
            return Err(EventError::Validation("Title is required".to_string()));
        }

        let explicit_slug = self.text("slug");
        let slug = if explicit_slug.is_empty() {
            let derived = slugify(&title);
            if derived.is_empty() {
                return Err(EventError::Validation(
                    "Title must contain at least one letter or number".to_string(),
                ));
            }
            derived
        } else {
            validate_slug(&explicit_slug)?.to_string()
        };

        Ok(EventDraft {
            slug,
            title,
            description: self.text("description"),
            overview: self.text("overview"),
            venue: self.text("venue"),
            location: self.text("location"),
            date: self.text("date"),
            time: self.text("time"),
            mode: self.text("mode"),
            audience: self.text("audience"),
            agenda: self.list("agenda"),
            organizer: self.text("organizer"),
            tags: self.list("tags"),
        })
    }
}

/// A seat reservation for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub event_id: Uuid,
    pub slug: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for booking an event
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    #[validate(email(message = "Please enter a valid email address"))]
    #[schema(example = "attendee@example.com")]
    pub email: String,
}

impl CreateBooking {
    /// Drop whitespace around the address so validation sees what gets stored.
    pub fn trimmed(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
        }
    }
}

/// Booking data ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub event_id: Uuid,
    pub slug: String,
    /// Trimmed and lowercased so one address books once
    pub email: String,
}

impl NewBooking {
    pub fn new(event: &Event, email: &str) -> Self {
        Self {
            event_id: event.id,
            slug: event.slug.clone(),
            email: email.trim().to_lowercase(),
        }
    }

    pub fn into_booking(self, id: Uuid, now: DateTime<Utc>) -> Booking {
        Booking {
            id,
            event_id: self.event_id,
            slug: self.slug,
            email: self.email,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_submission() -> EventSubmission {
        EventSubmission::default()
            .with_field("title", "RustConf 2025")
            .with_field("description", "The Rust conference")
            .with_field("overview", "Three days of Rust")
            .with_field("venue", "Oregon Convention Center")
            .with_field("location", "Portland, OR")
            .with_field("date", "2025-09-02")
            .with_field("time", "09:00")
            .with_field("mode", "hybrid")
            .with_field("audience", "Rustaceans")
            .with_field("organizer", "Rust Foundation")
            .with_field("tags", r#"["rust","systems"]"#)
            .with_field("agenda", "Keynote,Talks,Closing")
    }

    #[test]
    fn test_draft_derives_slug_from_title() {
        let draft = full_submission().to_draft().unwrap();
        assert_eq!(draft.slug, "rustconf-2025");
        assert_eq!(draft.tags, vec!["rust", "systems"]);
        assert_eq!(draft.agenda, vec!["Keynote", "Talks", "Closing"]);
    }

    #[test]
    fn test_draft_keeps_valid_explicit_slug() {
        let draft = full_submission()
            .with_field("slug", "rustconf-portland")
            .to_draft()
            .unwrap();
        assert_eq!(draft.slug, "rustconf-portland");
    }

    #[test]
    fn test_draft_rejects_invalid_explicit_slug() {
        let result = full_submission().with_field("slug", "Rust Conf").to_draft();
        assert!(matches!(result, Err(EventError::InvalidSlug(_))));
    }

    #[test]
    fn test_draft_requires_title() {
        let result = EventSubmission::default().with_field("title", "   ").to_draft();
        assert!(matches!(result, Err(EventError::Validation(_))));

        let result = EventSubmission::default().with_field("title", "???").to_draft();
        assert!(matches!(result, Err(EventError::Validation(_))));
    }

    #[test]
    fn test_repeated_fields_form_a_list() {
        let draft = full_submission()
            .with_field("tags", "web")
            .to_draft()
            .unwrap();
        assert_eq!(draft.tags, vec![r#"["rust","systems"]"#, "web"]);
    }

    #[test]
    fn test_new_event_requires_image() {
        let draft = full_submission().to_draft().unwrap();
        assert!(matches!(
            draft.clone().with_image("  ").validate(),
            Err(EventError::Validation(_))
        ));
        assert!(draft.with_image("https://cdn.example.com/a.png").validate().is_ok());
    }

    #[test]
    fn test_displayable_requires_every_rendered_field() {
        let event = full_submission()
            .to_draft()
            .unwrap()
            .with_image("https://cdn.example.com/a.png")
            .into_event(Uuid::now_v7(), Utc::now());
        assert!(event.is_displayable());

        let mut no_tags = event.clone();
        no_tags.tags.clear();
        assert!(!no_tags.is_displayable());

        let mut blank_mode = event.clone();
        blank_mode.mode = " ".to_string();
        assert!(!blank_mode.is_displayable());

        let mut no_image = event;
        no_image.image.clear();
        assert!(!no_image.is_displayable());
    }

    #[test]
    fn test_event_serializes_with_store_field_names() {
        let event = full_submission()
            .to_draft()
            .unwrap()
            .with_image("https://cdn.example.com/a.png")
            .into_event(Uuid::now_v7(), Utc::now());

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["slug"], "rustconf-2025");
    }

    #[test]
    fn test_booking_email_validation_and_normalization() {
        assert!(CreateBooking { email: "dev@example.com".into() }.validate().is_ok());
        assert!(CreateBooking { email: "not-an-email".into() }.validate().is_err());

        let event = full_submission()
            .to_draft()
            .unwrap()
            .with_image("https://cdn.example.com/a.png")
            .into_event(Uuid::now_v7(), Utc::now());
        let booking = NewBooking::new(&event, "  Dev@Example.COM ");
        assert_eq!(booking.email, "dev@example.com");
        assert_eq!(booking.event_id, event.id);
    }
}
