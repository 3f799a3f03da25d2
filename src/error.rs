//! Store error types with HTTP status code mapping.
//!
//! [`StoreError`] is the central error type for the crate. Remote-service
//! failures propagate to callers through it; the record-service emulator
//! maps each variant to an HTTP status and a structured JSON body.
//!
//! A missing user record is not an error: lookups return `Ok(None)`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid request: body must be a JSON object",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error enum shared by the stores, repositories, and storage adapters.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | Not Found       | 404 Not Found              |
/// | 3000–3999 | Local / Server  | 500 Internal Server Error  |
/// | 5000–5999 | Remote service  | 502 Bad Gateway            |
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Lookup against the remote user-record service failed.
    #[error("remote read failed: {0}")]
    RemoteRead(String),

    /// Create, update, or delete against the remote user-record service failed.
    #[error("remote write failed: {0}")]
    RemoteWrite(String),

    /// Secure storage read, write, or delete failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Storage key contains characters outside `[A-Za-z0-9._-]`.
    #[error("invalid storage key: {0:?}")]
    InvalidStorageKey(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Record addressed over HTTP does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidStorageKey(_) => 1002,
            Self::Serialization(_) => 1003,
            Self::NotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::Storage(_) => 3001,
            Self::RemoteRead(_) => 5001,
            Self::RemoteWrite(_) => 5002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidStorageKey(_) | Self::Serialization(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::RemoteRead(_) | Self::RemoteWrite(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for StoreError {
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
