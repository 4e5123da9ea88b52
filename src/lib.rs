//! treechan - Main Library
//!
//! treechan is an imageboard-style discussion forum backend: boards
//! contain threads, threads contain nested reply trees, and connected
//! clients receive live updates over WebSockets the moment something
//! changes.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Data shapes that cross layer boundaries
//!   - Board, Thread, Post domain model
//!   - Live-update event types and their wire format
//!
//! - **`backend`** - The Axum server
//!   - Real-time hub (subscription registry + broadcast dispatcher)
//!   - WebSocket connection lifecycle
//!   - Reply-tree materialization
//!   - MySQL query layer and JSON REST API
//!
//! # Usage
//!
//! ```rust,no_run
//! use treechan::backend::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await.expect("server init");
//! // Serve `app` with axum::serve
//! # }
//! ```

/// Server-side code: HTTP API, realtime hub, persistence
pub mod backend;

/// Types shared across layers
pub mod shared;
