/**
 * Forum Domain Model
 *
 * This module defines the three stored entities of the forum: boards,
 * threads and posts. All three serialize directly into API responses.
 *
 * # Depth
 *
 * `Post::depth` is a display attribute, not a stored column. It is zero
 * straight out of the database and only becomes meaningful after the
 * post list has been run through `backend::forum::tree::materialize`.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A board: the top-level container for threads.
///
/// The identifier doubles as the URL slug (`/b/`, `/tech/`, ...) and is
/// restricted to lowercase ASCII letters and digits at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    /// Board slug, e.g. "b" or "tech"
    pub id: String,
    /// Human-readable board name
    pub name: String,
    /// Board description shown in listings
    pub description: String,
    /// When the board was created
    pub created_at: DateTime<Utc>,
    /// Number of threads on the board (computed by the query layer)
    #[serde(default)]
    pub thread_count: i64,
}

/// A thread on a board.
///
/// `bumped_at` is the thread's last-activity timestamp; it is advanced
/// whenever a reply is appended and never moves backwards. Board views
/// sort by it by default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thread {
    pub id: i64,
    /// Owning board slug
    pub board_id: String,
    pub subject: String,
    pub created_at: DateTime<Utc>,
    /// Last-bump time; updated on every reply, never decreases
    pub bumped_at: DateTime<Utc>,
    /// Number of posts in the thread (computed by the query layer)
    #[serde(default)]
    pub post_count: i64,
    /// The opening post, attached by thread listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_post: Option<Post>,
}

/// A post inside a thread.
///
/// `parent_id` is a self-reference within the same thread. It may point
/// at a post that has since been deleted; the tree builder treats such
/// orphans as roots rather than erroring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: i64,
    /// Owning thread
    pub thread_id: i64,
    /// Parent post within the same thread, if this is a nested reply
    pub parent_id: Option<i64>,
    pub author: String,
    pub content: String,
    /// Path to an attached media file under /uploads, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_path: Option<String>,
    /// Media kind hint ("image", "video", ...), if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Nesting depth for display, assigned by tree materialization.
    /// Always >= 0; zero until `materialize` has run.
    #[serde(default)]
    pub depth: i32,
}
