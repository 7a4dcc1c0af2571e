//! Bridge error types with HTTP status code mapping.
//!
//! [`BridgeError`] is the central error type of the crate. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Whether error details are exposed is decided by the mount's explicit
//! debug flag, never by ambient global state.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "record not found: de-faced",
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
    /// Numeric error code (see code ranges on [`BridgeError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details, populated only in debug mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error enum for everything the bridge can reject or fail at.
///
/// # Error Code Ranges
///
/// | Range     | Category       | HTTP Status               |
/// |-----------|----------------|---------------------------|
/// | 1000–1999 | Validation     | 400 Bad Request           |
/// | 2000–2999 | Not Found      | 404 Not Found             |
/// | 3000–3999 | Server         | 500 Internal Server Error |
/// | 4000–4999 | Authentication | 401 / 403                 |
///
/// There is no "method not implemented" variant: capabilities a resource
/// does not implement are never wired into the router, so the framework
/// answers such requests with 405 before the bridge is involved.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Request did not pass the resource's authentication check.
    #[error("authentication required")]
    Unauthorized,

    /// Request is authenticated but not allowed to perform the operation.
    #[error("operation forbidden")]
    Forbidden,

    /// No record with the given identifier.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// Request body could not be decoded or deserialized.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// A resource return value could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal bridge error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::BadRequest(_) => 1001,
            Self::MalformedBody(_) => 1002,
            Self::NotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::Serialization(_) => 3001,
            Self::Unauthorized => 4001,
            Self::Forbidden => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    /// Converts the error into an HTTP response, exposing the debug
    /// representation in the `details` field when `debug` is set.
    #[must_use]
    pub fn into_response_with(self, debug: bool) -> Response {
        let status = self.status_code();
        let details = debug.then(|| format!("{self:?}"));
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        match crate::response::json_response(status, &body) {
            Ok(response) => response,
            Err(_) => status.into_response(),
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}
