//! Event domain error types

use axum::http::StatusCode;
use database::{DatabaseError, SharedError};
use thiserror::Error;

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// MongoDB server code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Event domain errors
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Invalid or missing slug parameter")]
    MissingSlug,

    #[error("Invalid slug format")]
    InvalidSlug(String),

    #[error("Event not found")]
    NotFound { slug: String },

    #[error("{0}")]
    Validation(String),

    #[error("Image file is required")]
    MissingImage,

    #[error("Invalid file type. Only images are allowed.")]
    InvalidImageType(String),

    #[error("File size exceeds 5MB limit.")]
    ImageTooLarge { size: usize },

    #[error("Invalid form data")]
    InvalidForm(String),

    #[error("Event with this slug already exists")]
    DuplicateSlug(String),

    #[error("A booking for this email already exists")]
    DuplicateBooking,

    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("Image upload failed - invalid response")]
    InvalidUploadResponse(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Database connection failed: {0}")]
    Connection(#[from] SharedError<DatabaseError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EventError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingSlug
            | Self::InvalidSlug(_)
            | Self::Validation(_)
            | Self::MissingImage
            | Self::InvalidImageType(_)
            | Self::ImageTooLarge { .. }
            | Self::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateSlug(_) | Self::DuplicateBooking => StatusCode::CONFLICT,
            Self::Upload(_)
            | Self::InvalidUploadResponse(_)
            | Self::Database(_)
            | Self::Connection(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing detail for the envelope's `error` field on 4xx responses.
    pub(crate) fn client_detail(&self) -> Option<String> {
        match self {
            Self::InvalidSlug(_) => {
                Some("Slug must contain only lowercase letters, numbers, and hyphens".to_string())
            }
            Self::NotFound { slug } => Some(format!("No event exists with slug: {slug}")),
            Self::InvalidImageType(content_type) => {
                Some(format!("Received content type: {content_type}"))
            }
            Self::ImageTooLarge { size } => Some(format!("Received {size} bytes")),
            Self::InvalidForm(detail) => Some(detail.clone()),
            Self::DuplicateSlug(slug) => Some(format!("An event with slug '{slug}' already exists")),
            _ => None,
        }
    }
}

/// Whether a driver error is a unique index violation.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Internal(format!("BSON serialization error: {err}"))
    }
}

impl From<validator::ValidationErrors> for EventError {
    fn from(err: validator::ValidationErrors) -> Self {
        let message = err
            .field_errors()
            .into_values()
            .flatten()
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| err.to_string());
        Self::Validation(message)
    }
}
