//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid request: fim must be after inicio",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges below).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | Not Found       | 404 Not Found              |
/// | 3000–3999 | Server          | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Event with the given ID was not found.
    #[error("evento not found: {0}")]
    EventoNotFound(uuid::Uuid),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown or malformed lifecycle status string.
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    /// Scheduled window is malformed (`inicio >= fim` or unparseable).
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidStatus(_) => 1002,
            Self::InvalidSchedule(_) => 1003,
            Self::EventoNotFound(_) => 2001,
            Self::PersistenceError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidStatus(_) | Self::InvalidSchedule(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::EventoNotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        let errors = [
            GatewayError::InvalidRequest("x".to_string()),
            GatewayError::InvalidStatus("finalizado".to_string()),
            GatewayError::InvalidSchedule("inverted".to_string()),
        ];
        for e in errors {
            assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
            assert!((1000..2000).contains(&e.error_code()));
        }
    }

    #[test]
    fn not_found_maps_to_404() {
        let e = GatewayError::EventoNotFound(uuid::Uuid::new_v4());
        assert_eq!(e.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(e.error_code(), 2001);
    }

    #[test]
    fn server_errors_map_to_500() {
        let errors = [
            GatewayError::PersistenceError("connection refused".to_string()),
            GatewayError::Internal("oops".to_string()),
        ];
        for e in errors {
            assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!((3000..4000).contains(&e.error_code()));
        }
    }

    #[test]
    fn messages_include_context() {
        let e = GatewayError::InvalidStatus("finalizado".to_string());
        assert_eq!(e.to_string(), "invalid status: finalizado");
    }
}
