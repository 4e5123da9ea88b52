//! Route Configuration
//!
//! Router assembly for the REST API, the WebSocket endpoints and
//! static upload serving.

/// Router assembly
pub mod router;

pub use router::create_router;
