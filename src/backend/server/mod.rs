//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── state.rs  - AppState and FromRef implementations
//! ├── config.rs - Environment configuration (database, port)
//! └── init.rs   - App construction
//! ```

/// Application state management
pub mod state;

/// Environment configuration
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used items
pub use init::create_app;
pub use state::AppState;
