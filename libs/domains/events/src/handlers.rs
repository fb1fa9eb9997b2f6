//! HTTP handlers for the events API

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::{OpenApi, ToSchema};

use crate::error::{EventError, Result};
use crate::models::{Booking, CreateBooking, Event, EventSubmission};
use crate::response::{ApiError, EventEnvelope, Operation};
use crate::service::EventService;
use crate::upload::{ImageUpload, MAX_IMAGE_BYTES};

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Form field carrying the image file.
const IMAGE_FIELD: &str = "image";

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        create_event,
        get_event,
        similar_events,
        create_booking,
        count_bookings,
    ),
    components(schemas(Event, Booking, CreateBooking, EventEnvelope, EventForm)),
    tags(
        (name = "Events", description = "Event listings and bookings (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
///
/// The body limit leaves room above the image limit so oversize files are
/// reported by validation rather than cut off mid-stream.
pub fn router(service: EventService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/{slug}", get(get_event))
        .route("/{slug}/similar", get(similar_events))
        .route("/{slug}/bookings", post(create_booking))
        .route("/{slug}/bookings/count", get(count_bookings))
        .layer(DefaultBodyLimit::max(2 * MAX_IMAGE_BYTES))
        .with_state(shared_service)
}

/// Multipart body accepted by `POST /api/events`.
///
/// `tags` and `agenda` may be sent as a JSON array string, a comma-separated
/// string, or as repeated fields.
#[derive(Serialize, ToSchema)]
pub struct EventForm {
    /// Image file (jpeg, png, gif or webp, at most 5 MiB)
    #[schema(value_type = String, format = Binary)]
    image: String,
    title: String,
    /// Derived from the title when omitted
    slug: Option<String>,
    description: Option<String>,
    overview: Option<String>,
    venue: Option<String>,
    location: Option<String>,
    date: Option<String>,
    time: Option<String>,
    mode: Option<String>,
    audience: Option<String>,
    organizer: Option<String>,
    #[schema(example = r#"["rust","systems"]"#)]
    tags: Option<String>,
    #[schema(example = "Keynote,Workshops,Closing")]
    agenda: Option<String>,
}

/// List all events, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    responses(
        (status = 200, description = "Events fetched successfully", body = EventEnvelope),
        (status = 500, description = "Event fetching failed", body = EventEnvelope)
    )
)]
#[instrument(skip(service))]
async fn list_events(
    State(service): State<Arc<EventService>>,
) -> ApiResult<Json<EventEnvelope>> {
    let events = service
        .list()
        .await
        .map_err(|e| e.during(Operation::ListEvents))?;

    Ok(Json(
        EventEnvelope::message("Events fetched successfully").with_events(events),
    ))
}

/// Create an event from a multipart form, uploading its image
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body(content = EventForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Event created successfully", body = EventEnvelope,
            headers(("Location" = String, description = "URL of the new event"))),
        (status = 400, description = "Invalid form, image or field", body = EventEnvelope),
        (status = 409, description = "Event with this slug already exists", body = EventEnvelope),
        (status = 500, description = "Event Creation Failed", body = EventEnvelope)
    )
)]
#[instrument(skip(service, multipart))]
async fn create_event(
    State(service): State<Arc<EventService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> ApiResult<impl IntoResponse> {
    let created = async {
        let multipart = multipart.map_err(|e| EventError::InvalidForm(e.body_text()))?;
        let submission = read_submission(multipart).await?;
        service.create(submission).await
    }
    .await
    .map_err(|e| e.during(Operation::CreateEvent))?;

    let location = service.location_of(&created);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(EventEnvelope::message("Event created successfully").with_event(created)),
    ))
}

/// Fetch one event by slug
#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Events",
    params(
        ("slug" = String, Path, description = "Event slug", example = "rustconf-2025")
    ),
    responses(
        (status = 200, description = "Event fetched successfully", body = EventEnvelope),
        (status = 400, description = "Invalid or missing slug", body = EventEnvelope),
        (status = 404, description = "Event not found", body = EventEnvelope),
        (status = 500, description = "Failed to fetch event", body = EventEnvelope)
    )
)]
#[instrument(skip(service))]
async fn get_event(
    State(service): State<Arc<EventService>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<EventEnvelope>> {
    let event = service
        .get_by_slug(&slug)
        .await
        .map_err(|e| e.during(Operation::FetchEvent))?;

    Ok(Json(
        EventEnvelope::message("Event fetched successfully").with_event(event),
    ))
}

/// Displayable events sharing a tag with this one
#[utoipa::path(
    get,
    path = "/{slug}/similar",
    tag = "Events",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    responses(
        (status = 200, description = "Similar events fetched successfully", body = EventEnvelope),
        (status = 400, description = "Invalid or missing slug", body = EventEnvelope),
        (status = 404, description = "Event not found", body = EventEnvelope),
        (status = 500, description = "Failed to fetch similar events", body = EventEnvelope)
    )
)]
#[instrument(skip(service))]
async fn similar_events(
    State(service): State<Arc<EventService>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<EventEnvelope>> {
    let events = service
        .similar(&slug)
        .await
        .map_err(|e| e.during(Operation::SimilarEvents))?;

    Ok(Json(
        EventEnvelope::message("Similar events fetched successfully").with_events(events),
    ))
}

/// Book a seat on an event
#[utoipa::path(
    post,
    path = "/{slug}/bookings",
    tag = "Events",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created successfully", body = EventEnvelope),
        (status = 400, description = "Invalid email or slug", body = EventEnvelope),
        (status = 404, description = "Event not found", body = EventEnvelope),
        (status = 409, description = "Already booked", body = EventEnvelope),
        (status = 500, description = "Booking failed", body = EventEnvelope)
    )
)]
#[instrument(skip(service, payload))]
async fn create_booking(
    State(service): State<Arc<EventService>>,
    Path(slug): Path<String>,
    payload: std::result::Result<Json<CreateBooking>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let booking = async {
        let Json(input) = payload.map_err(|e| EventError::Validation(e.body_text()))?;
        service.book(&slug, input).await
    }
    .await
    .map_err(|e| e.during(Operation::CreateBooking))?;

    Ok((
        StatusCode::CREATED,
        Json(EventEnvelope::message("Booking created successfully").with_booking(booking)),
    ))
}

/// Number of bookings for an event
#[utoipa::path(
    get,
    path = "/{slug}/bookings/count",
    tag = "Events",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    responses(
        (status = 200, description = "Bookings counted", body = EventEnvelope),
        (status = 400, description = "Invalid or missing slug", body = EventEnvelope),
        (status = 404, description = "Event not found", body = EventEnvelope),
        (status = 500, description = "Failed to count bookings", body = EventEnvelope)
    )
)]
#[instrument(skip(service))]
async fn count_bookings(
    State(service): State<Arc<EventService>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<EventEnvelope>> {
    let count = service
        .count_bookings(&slug)
        .await
        .map_err(|e| e.during(Operation::CountBookings))?;

    Ok(Json(
        EventEnvelope::message("Bookings counted successfully").with_count(count),
    ))
}

fn form_error(err: MultipartError) -> EventError {
    EventError::InvalidForm(err.body_text())
}

/// Collect every multipart field; the `image` field becomes the upload.
///
/// A file input left empty by the browser arrives as a nameless, empty part and
/// counts as no image.
async fn read_submission(mut multipart: Multipart) -> Result<EventSubmission> {
    let mut submission = EventSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(form_error)?;

            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            submission.image = Some(ImageUpload::new(file_name, content_type, bytes));
        } else {
            let value = field.text().await.map_err(form_error)?;
            submission.push_field(name, value);
        }
    }

    Ok(submission)
}
