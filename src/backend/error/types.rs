/**
 * Backend Error Types
 *
 * This module defines the error type used by every HTTP handler. The
 * realtime hub and the tree builder deliberately expose no error
 * types: the hub is fire-and-forget and the tree builder degrades
 * gracefully on malformed input.
 */
use axum::http::StatusCode;
use thiserror::Error;

/// Errors a request handler can produce.
///
/// Client-caused variants carry the message shown to the caller;
/// database errors are logged server-side and surface as an opaque 500.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or incomplete request
    #[error("{0}")]
    BadRequest(String),

    /// Referenced board, thread or post does not exist
    #[error("{0}")]
    NotFound(String),

    /// Creation conflicts with an existing entity
    #[error("{0}")]
    Conflict(String),

    /// Query layer failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message exposed to the client. Internal failure details
    /// stay in the server log.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Database(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
