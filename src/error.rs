//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type returned by the lifecycle
//! service and the handlers. Each variant maps to a specific HTTP status
//! code and structured JSON error response.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{InvalidPostId, PostId, ValidationError};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "title is required and must not be empty",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Raw store failure, only present in development mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                                  |
/// |-----------|------------|----------------------------------------------|
/// | 1000–1999 | Validation | 400 Bad Request                              |
/// | 2000–2999 | Not Found  | 404 Not Found                                |
/// | 3000–3999 | Store      | 500 for reads, 400 for writes                |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A required field was missing or empty.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// The path segment is not a positive integer id.
    #[error(transparent)]
    InvalidPostId(#[from] InvalidPostId),

    /// The request body is not valid JSON for a post submission.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// No post with the given id exists.
    #[error("post not found: {0}")]
    PostNotFound(PostId),

    /// No draft with the given id exists. A published post with the same
    /// id is reported this way too.
    #[error("draft not found: {0}")]
    DraftNotFound(PostId),

    /// The store failed while reading.
    #[error("failed to read from the post store")]
    StoreRead {
        /// Raw store failure, set only in development mode.
        details: Option<String>,
    },

    /// The store failed while writing. Attributed to the request.
    #[error("failed to write to the post store")]
    StoreWrite {
        /// Raw store failure, set only in development mode.
        details: Option<String>,
    },
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidPostId(_) => 1002,
            Self::MalformedBody(_) => 1003,
            Self::PostNotFound(_) => 2001,
            Self::DraftNotFound(_) => 2002,
            Self::StoreRead { .. } => 3001,
            Self::StoreWrite { .. } => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidPostId(_)
            | Self::MalformedBody(_)
            | Self::StoreWrite { .. } => StatusCode::BAD_REQUEST,
            Self::PostNotFound(_) | Self::DraftNotFound(_) => StatusCode::NOT_FOUND,
            Self::StoreRead { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::StoreRead { details } | Self::StoreWrite { details } => details.clone(),
            _ => None,
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
