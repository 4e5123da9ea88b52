/**
 * Database Operations for Boards, Threads and Posts
 *
 * This module is the post store: every query the forum runs against
 * MySQL lives here. Handlers never build SQL themselves.
 *
 * Thread listings attach their opening post and a post count; thread
 * reads return posts already run through tree materialization, in
 * display order with depths assigned.
 */
use crate::backend::forum::tree::materialize;
use crate::shared::model::{Board, Post, Thread};
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

/// Sort order for board thread listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadSort {
    /// Most recently bumped first (the default)
    Bump,
    /// Newest first
    New,
    /// Oldest first
    Old,
    /// Most replies first
    Replies,
}

impl ThreadSort {
    /// Parse the `sort` query parameter; anything unrecognized falls
    /// back to bump order.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("new") => ThreadSort::New,
            Some("old") => ThreadSort::Old,
            Some("replies") => ThreadSort::Replies,
            _ => ThreadSort::Bump,
        }
    }

    fn order_clause(self) -> &'static str {
        match self {
            ThreadSort::Bump => "t.bumped_at DESC",
            ThreadSort::New => "t.created_at DESC",
            ThreadSort::Old => "t.created_at ASC",
            ThreadSort::Replies => "post_count DESC",
        }
    }
}

/// Create the schema if it does not exist yet.
pub async fn init_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS boards (
            id VARCHAR(50) PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            description TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS threads (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            board_id VARCHAR(50) NOT NULL,
            subject VARCHAR(255) NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            bumped_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (board_id) REFERENCES boards(id) ON DELETE CASCADE,
            INDEX idx_board_bumped (board_id, bumped_at DESC)
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            thread_id BIGINT NOT NULL,
            parent_id BIGINT DEFAULT NULL,
            author VARCHAR(100) NOT NULL DEFAULT 'Anonymous',
            content TEXT NOT NULL,
            media_path VARCHAR(500),
            media_type VARCHAR(20),
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (thread_id) REFERENCES threads(id) ON DELETE CASCADE,
            FOREIGN KEY (parent_id) REFERENCES posts(id) ON DELETE SET NULL,
            INDEX idx_thread (thread_id),
            INDEX idx_parent (parent_id)
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
        "#,
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("[DB] schema checked/created");
    Ok(())
}

// === BOARDS ===

#[derive(sqlx::FromRow)]
struct BoardRow {
    id: String,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    thread_count: i64,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Board {
            id: row.id,
            name: row.name,
            description: row.description.unwrap_or_default(),
            created_at: row.created_at,
            thread_count: row.thread_count,
        }
    }
}

/// All boards with their thread counts, ordered by slug.
pub async fn list_boards(pool: &MySqlPool) -> Result<Vec<Board>, sqlx::Error> {
    let rows = sqlx::query_as::<_, BoardRow>(
        r#"
        SELECT b.id, b.name, b.description, b.created_at,
               COALESCE(COUNT(t.id), 0) AS thread_count
        FROM boards b
        LEFT JOIN threads t ON b.id = t.board_id
        GROUP BY b.id
        ORDER BY b.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Board::from).collect())
}

/// One board by slug, `None` when absent.
pub async fn get_board(pool: &MySqlPool, id: &str) -> Result<Option<Board>, sqlx::Error> {
    let row = sqlx::query_as::<_, BoardRow>(
        r#"
        SELECT b.id, b.name, b.description, b.created_at,
               COALESCE(COUNT(t.id), 0) AS thread_count
        FROM boards b
        LEFT JOIN threads t ON b.id = t.board_id
        WHERE b.id = ?
        GROUP BY b.id
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Board::from))
}

pub async fn create_board(
    pool: &MySqlPool,
    id: &str,
    name: &str,
    description: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO boards (id, name, description) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    Ok(())
}

// === THREADS ===

#[derive(sqlx::FromRow)]
struct ThreadRow {
    id: i64,
    board_id: String,
    subject: String,
    created_at: DateTime<Utc>,
    bumped_at: DateTime<Utc>,
    post_count: i64,
}

impl From<ThreadRow> for Thread {
    fn from(row: ThreadRow) -> Self {
        Thread {
            id: row.id,
            board_id: row.board_id,
            subject: row.subject,
            created_at: row.created_at,
            bumped_at: row.bumped_at,
            post_count: row.post_count,
            first_post: None,
        }
    }
}

/// Threads of one board in the requested sort order, each with its
/// post count and opening post.
pub async fn threads_by_board(
    pool: &MySqlPool,
    board_id: &str,
    sort: ThreadSort,
) -> Result<Vec<Thread>, sqlx::Error> {
    // The order clause comes from a fixed enum, never user input.
    let query = format!(
        r#"
        SELECT t.id, t.board_id, t.subject, t.created_at, t.bumped_at,
               COUNT(p.id) AS post_count
        FROM threads t
        LEFT JOIN posts p ON t.id = p.thread_id
        WHERE t.board_id = ?
        GROUP BY t.id
        ORDER BY {}
        "#,
        sort.order_clause()
    );

    let rows = sqlx::query_as::<_, ThreadRow>(&query)
        .bind(board_id)
        .fetch_all(pool)
        .await?;

    let mut threads = Vec::with_capacity(rows.len());
    for row in rows {
        let mut thread = Thread::from(row);
        thread.first_post = first_post(pool, thread.id).await?;
        threads.push(thread);
    }
    Ok(threads)
}

/// One thread by id, `None` when absent. Post count and OP are not
/// attached here; thread views load posts separately.
pub async fn get_thread(pool: &MySqlPool, id: i64) -> Result<Option<Thread>, sqlx::Error> {
    let row = sqlx::query_as::<_, ThreadRow>(
        r#"
        SELECT id, board_id, subject, created_at, bumped_at, 0 AS post_count
        FROM threads
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Thread::from))
}

/// Create a thread and return its id.
pub async fn create_thread(
    pool: &MySqlPool,
    board_id: &str,
    subject: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO threads (board_id, subject) VALUES (?, ?)")
        .bind(board_id)
        .bind(subject)
        .execute(pool)
        .await?;
    Ok(result.last_insert_id() as i64)
}

/// Advance the thread's last-activity timestamp.
pub async fn bump_thread(pool: &MySqlPool, thread_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE threads SET bumped_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(thread_id)
        .execute(pool)
        .await?;
    Ok(())
}

// === POSTS ===

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    thread_id: i64,
    parent_id: Option<i64>,
    author: String,
    content: String,
    media_path: Option<String>,
    media_type: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            thread_id: row.thread_id,
            parent_id: row.parent_id,
            author: row.author,
            content: row.content,
            media_path: row.media_path,
            media_type: row.media_type,
            created_at: row.created_at,
            depth: 0,
        }
    }
}

const POST_COLUMNS: &str =
    "id, thread_id, parent_id, author, content, media_path, media_type, created_at";

/// All posts of one thread in display order: fetched creation-time
/// ascending (id as tiebreaker) and materialized into the reply tree.
pub async fn posts_by_thread(
    pool: &MySqlPool,
    thread_id: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM posts WHERE thread_id = ? ORDER BY created_at ASC, id ASC",
        POST_COLUMNS
    );
    let rows = sqlx::query_as::<_, PostRow>(&query)
        .bind(thread_id)
        .fetch_all(pool)
        .await?;

    Ok(materialize(rows.into_iter().map(Post::from).collect()))
}

/// The opening post of a thread, `None` for an empty thread.
pub async fn first_post(
    pool: &MySqlPool,
    thread_id: i64,
) -> Result<Option<Post>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM posts WHERE thread_id = ? ORDER BY created_at ASC, id ASC LIMIT 1",
        POST_COLUMNS
    );
    let row = sqlx::query_as::<_, PostRow>(&query)
        .bind(thread_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Post::from))
}

/// One post by id, `None` when absent.
pub async fn get_post(pool: &MySqlPool, id: i64) -> Result<Option<Post>, sqlx::Error> {
    let query = format!("SELECT {} FROM posts WHERE id = ?", POST_COLUMNS);
    let row = sqlx::query_as::<_, PostRow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Post::from))
}

/// Append a post and return its id.
///
/// A missing or non-positive parent id is stored as NULL (a root-level
/// reply); empty media fields are stored as NULL.
pub async fn create_post(
    pool: &MySqlPool,
    thread_id: i64,
    parent_id: Option<i64>,
    author: &str,
    content: &str,
    media_path: Option<&str>,
    media_type: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let parent_id = parent_id.filter(|id| *id > 0);
    let media_path = media_path.filter(|path| !path.is_empty());
    let media_type = media_type.filter(|kind| !kind.is_empty());

    let result = sqlx::query(
        r#"
        INSERT INTO posts (thread_id, parent_id, author, content, media_path, media_type)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(thread_id)
    .bind(parent_id)
    .bind(author)
    .bind(content)
    .bind(media_path)
    .bind(media_type)
    .execute(pool)
    .await?;

    Ok(result.last_insert_id() as i64)
}
