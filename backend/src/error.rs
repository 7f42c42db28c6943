//! Unified error handling for the backend API.
//!
//! Handlers use the `?` operator naturally; this module maps engine errors
//! to HTTP status codes and a JSON error body at the boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::calendar::CalendarError;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Calendar(err) = self;
        let (status, error_message, details) = match &err {
            CalendarError::SourceFetch { source_name: source, message } => {
                tracing::error!("source fetch failed for {}: {}", source, message);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("{} source unavailable", source),
                    Some(message.clone()),
                )
            }
            CalendarError::InvalidReference(message) => {
                (StatusCode::BAD_REQUEST, message.clone(), None)
            }
            CalendarError::UnsupportedOperation { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string(), None)
            }
            CalendarError::RemoteWrite(message) => {
                tracing::error!("meeting store rejected write: {}", message);
                (
                    StatusCode::BAD_GATEWAY,
                    "meeting store rejected the write".to_string(),
                    Some(message.clone()),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
