use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Fallback for unmatched routes
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::from_code(ErrorCode::NotFound))).into_response()
}

/// Fallback for routes that exist but not for the request method
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::from_code(ErrorCode::MethodNotAllowed)),
    )
        .into_response()
}
