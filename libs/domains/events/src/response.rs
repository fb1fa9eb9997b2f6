//! Response envelope shared by every event endpoint

use crate::error::EventError;
use crate::models::{Booking, Event};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{error, info};
use utoipa::ToSchema;

/// JSON body returned by the events API, on success and on failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EventEnvelope {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EventEnvelope {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_booking(mut self, booking: Booking) -> Self {
        self.booking = Some(booking);
        self
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}

/// The endpoint an error came from; decides the wording of 500 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    FetchEvent,
    ListEvents,
    CreateEvent,
    SimilarEvents,
    CreateBooking,
    CountBookings,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::FetchEvent => "Failed to fetch event",
            Self::ListEvents => "Event fetching failed",
            Self::CreateEvent => "Event Creation Failed",
            Self::SimilarEvents => "Failed to fetch similar events",
            Self::CreateBooking => "Booking failed",
            Self::CountBookings => "Failed to count bookings",
        }
    }

    /// Whether infrastructure detail is echoed to the client on failure.
    fn exposes_detail(self) -> bool {
        matches!(self, Self::CreateEvent | Self::ListEvents)
    }
}

/// An `EventError` bound to the endpoint that produced it.
#[derive(Debug)]
pub struct ApiError {
    pub operation: Operation,
    pub error: EventError,
}

impl EventError {
    pub fn during(self, operation: Operation) -> ApiError {
        ApiError {
            operation,
            error: self,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.error.status()
    }

    /// Envelope sent for this failure.
    pub fn envelope(&self) -> EventEnvelope {
        let status = self.status();
        if status.is_client_error() {
            return EventEnvelope::message(self.error.to_string())
                .with_error(self.error.client_detail());
        }

        let message = match &self.error {
            EventError::InvalidUploadResponse(_) => self.error.to_string(),
            _ => self.operation.failure_message().to_string(),
        };
        let detail = self
            .operation
            .exposes_detail()
            .then(|| self.error.to_string());

        EventEnvelope::message(message).with_error(detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(operation = %self.operation, error = %self.error, "Request failed");
        } else {
            info!(operation = %self.operation, error = %self.error, status = status.as_u16(), "Request rejected");
        }

        (status, Json(self.envelope())).into_response()
    }
}
