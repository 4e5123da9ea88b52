/**
 * Topic Grouping Key
 *
 * A topic is a logical broadcast channel: "everyone watching thread T",
 * "everyone watching board B", or "everyone on the front page". Topics
 * are pure grouping keys for the subscription registry; they are never
 * stored.
 */
use std::fmt;

/// A logical channel of interest for live updates.
///
/// Each WebSocket connection is bound to exactly one topic at
/// registration time and stays on it for its whole life.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// All listeners of a single thread
    Thread(i64),
    /// All listeners of a single board
    Board(String),
    /// Front-page listeners (board creation announcements)
    Home,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Thread(id) => write!(f, "thread:{}", id),
            Topic::Board(id) => write!(f, "board:{}", id),
            Topic::Home => write!(f, "home"),
        }
    }
}
