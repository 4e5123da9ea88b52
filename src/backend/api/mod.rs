//! JSON REST API
//!
//! The CRUD glue around the core: request parsing, validation, query
//! layer calls, and the publish calls that feed the realtime hub after
//! each successful mutation.
//!
//! # Response Envelope
//!
//! Every endpoint answers with the same JSON envelope:
//!
//! ```json
//! {"success": true, "data": ...}
//! {"success": false, "error": "..."}
//! ```
//!
//! # Mutation Ordering
//!
//! Mutations are written to the database first and published to the
//! hub second. A client can therefore observe the persisted record
//! before (or concurrently with) the notification, but never a
//! notification for a record that will not eventually be readable.

/// Board endpoints
pub mod boards;

/// Post endpoints
pub mod posts;

/// Thread endpoints
pub mod threads;

use axum::Json;
use serde::Serialize;

/// The success envelope wrapping every API payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap `data` in the success envelope.
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
        })
    }
}
