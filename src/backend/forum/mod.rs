//! Forum Module
//!
//! Boards, threads and posts: the query layer over MySQL and the pure
//! reply-tree materialization that turns a flat post list into the
//! depth-annotated sequence the display layer renders.
//!
//! # Module Structure
//!
//! ```text
//! forum/
//! ├── mod.rs  - Module exports and documentation
//! ├── db.rs   - sqlx query layer (the post store)
//! └── tree.rs - Reply-tree materialization
//! ```

/// MySQL query layer
pub mod db;

/// Reply-tree materialization
pub mod tree;

pub use db::ThreadSort;
pub use tree::materialize;
