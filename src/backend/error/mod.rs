//! Backend Error Module
//!
//! Error types for the HTTP layer and their conversion into JSON
//! responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - ApiError definition
//! └── conversion.rs - IntoResponse implementation
//! ```

/// Error type definitions
pub mod types;

/// Conversion to HTTP responses
pub mod conversion;

pub use types::ApiError;
