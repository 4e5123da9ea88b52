//! Shared Module
//!
//! This module contains the data shapes that cross layer boundaries:
//! the forum domain model (boards, threads, posts) and the live-update
//! event types pushed to WebSocket clients.
//!
//! # Overview
//!
//! Everything in here is plain data designed for serialization. The
//! backend query layer produces these types and the API handlers and
//! realtime hub consume them unchanged.

/// Forum domain model: boards, threads, posts
pub mod model;

/// Live-update event types
pub mod event;

/// Re-export commonly used types for convenience
pub use event::{EventKind, WsEvent};
pub use model::{Board, Post, Thread};
