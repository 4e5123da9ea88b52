/**
 * Live-Update Event Types
 *
 * This module defines the events pushed over WebSocket connections when
 * the forum mutates. Events are transient: they are constructed at
 * mutation time, serialized once by the hub, delivered best-effort, and
 * never persisted. A client that misses one still observes correct
 * state on its next REST read.
 *
 * # Wire Shape
 *
 * ```json
 * {"type": "new_post", "thread_id": 7, "data": {"id": 42, "author": "...", ...}}
 * {"type": "thread_updated", "thread_id": 7, "board_id": "b"}
 * {"type": "new_thread", "thread_id": 8, "board_id": "b"}
 * {"type": "new_board", "board_id": "tech"}
 * ```
 *
 * Absent fields are omitted entirely rather than serialized as null.
 */
use crate::shared::model::Post;
use serde::{Deserialize, Serialize};

/// Kind of live-update event, serialized in the `type` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new thread was created on a board
    NewThread,
    /// A new post was appended to a thread
    NewPost,
    /// A thread's activity changed (reply appended, thread bumped)
    ThreadUpdated,
    /// A new board was created
    NewBoard,
}

/// An event pushed to every listener of the affected topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WsEvent {
    /// Event kind
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Affected thread, when relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<i64>,
    /// Affected board, when relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    /// Event payload; for `new_post` this carries the post fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl WsEvent {
    /// A thread was created on `board_id`.
    pub fn new_thread(thread_id: i64, board_id: &str) -> Self {
        Self {
            kind: EventKind::NewThread,
            thread_id: Some(thread_id),
            board_id: Some(board_id.to_string()),
            data: None,
        }
    }

    /// A post was appended; carries the post fields clients render inline.
    pub fn new_post(post: &Post) -> Self {
        Self {
            kind: EventKind::NewPost,
            thread_id: Some(post.thread_id),
            board_id: None,
            data: Some(serde_json::json!({
                "id": post.id,
                "author": post.author,
                "content": post.content,
                "media_path": post.media_path,
                "media_type": post.media_type,
                "parent_id": post.parent_id.unwrap_or(0),
                "created_at": post.created_at.to_rfc3339(),
            })),
        }
    }

    /// A thread on `board_id` saw new activity.
    pub fn thread_updated(thread_id: i64, board_id: &str) -> Self {
        Self {
            kind: EventKind::ThreadUpdated,
            thread_id: Some(thread_id),
            board_id: Some(board_id.to_string()),
            data: None,
        }
    }

    /// A board was created.
    pub fn new_board(board_id: &str) -> Self {
        Self {
            kind: EventKind::NewBoard,
            thread_id: None,
            board_id: Some(board_id.to_string()),
            data: None,
        }
    }
}
