//! Real-time Update Module
//!
//! This module is the live-update core of the forum: it tracks which
//! WebSocket connections are interested in which topic and fans out
//! mutation events to them.
//!
//! # Architecture
//!
//! The realtime module is organized into focused submodules:
//!
//! - **`topic`** - The `Topic` grouping key (thread, board, home)
//! - **`hub`** - Subscription registry + broadcast dispatcher
//! - **`session`** - WebSocket handshake and per-connection lifecycle
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs     - Module exports and documentation
//! ├── topic.rs   - Topic grouping key
//! ├── hub.rs     - Registry and publish (fan-out)
//! └── session.rs - Connection lifecycle handlers
//! ```
//!
//! # Delivery Model
//!
//! Delivery is best-effort and fire-and-forget. The authoritative state
//! always lives in the database; a client that misses an event simply
//! re-reads via the REST API. `Hub::publish` therefore never returns an
//! error: per-listener failures tear down that one listener and nothing
//! else.
//!
//! # Concurrency
//!
//! The registry map is the only shared mutable state in the core. It is
//! guarded by a single `std::sync::RwLock` whose critical sections are
//! O(1) map operations; no I/O ever happens under the lock. Each live
//! connection occupies one tokio task blocked on its inbound socket,
//! which serves purely as a disconnect detector.

/// Topic grouping key
pub mod topic;

/// Subscription registry and broadcast dispatcher
pub mod hub;

/// WebSocket connection lifecycle
pub mod session;

// Re-export commonly used types
pub use hub::{ConnectionSender, Hub, ListenerId};
pub use topic::Topic;
