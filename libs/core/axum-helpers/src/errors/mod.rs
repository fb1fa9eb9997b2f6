//! Error bodies for framework-level failures
//!
//! Domain routers return their own response shapes; these cover requests that
//! never reach a domain handler.

pub mod handlers;

use serde::Serialize;
use utoipa::ToSchema;

/// Machine-readable failure kinds with stable integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    MethodNotAllowed,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            Self::NotFound => 1004,
            Self::MethodNotAllowed => 1013,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            Self::NotFound => "The requested resource was not found",
            Self::MethodNotAllowed => "The request method is not supported for this route",
        }
    }
}

/// Body returned by the router fallbacks.
///
/// ```json
/// { "code": 1004, "error": "NOT_FOUND", "message": "The requested resource was not found" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    pub error: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str(),
            message: message.into(),
        }
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }
}
