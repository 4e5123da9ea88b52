//! Backend Module
//!
//! All server-side code for the treechan forum: the Axum HTTP server,
//! the realtime notification hub, reply-tree materialization and the
//! MySQL query layer.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Initialization, application state, configuration
//! - **`routes`** - Router assembly
//! - **`api`** - JSON REST handlers (the CRUD glue)
//! - **`realtime`** - Subscription registry, broadcast dispatcher,
//!   WebSocket connection lifecycle
//! - **`forum`** - Tree builder and database queries
//! - **`error`** - Handler error types
//!
//! # Control Flow
//!
//! A mutation (new board/thread/post) is written to the database
//! first, then handed to the hub, which snapshots the affected topic's
//! listeners and pushes the event to each of them. Listener lifecycle
//! is independent: a client connects, registers for one topic, parks
//! until disconnect, and is removed.
//!
//! # State Management
//!
//! `AppState` carries the two shared handles - the connection pool and
//! the hub - and is cloned into every handler. The hub's topic map is
//! the only shared mutable state; see `realtime::hub` for its locking
//! discipline.

/// JSON REST API handlers
pub mod api;

/// Backend error types
pub mod error;

/// Tree builder and query layer
pub mod forum;

/// Real-time update system
pub mod realtime;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

// Re-export commonly used types
pub use error::ApiError;
pub use realtime::{Hub, Topic};
pub use server::{create_app, AppState};
