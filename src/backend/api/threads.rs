/**
 * Thread Endpoints
 *
 * - `GET  /api/v1/boards/{id}/threads?sort=` - list a board's threads
 * - `GET  /api/v1/threads/{id}`              - thread with its post tree
 * - `POST /api/v1/threads`                   - create a thread (+OP post)
 */
use crate::backend::api::ApiResponse;
use crate::backend::error::ApiError;
use crate::backend::forum::db::{self, ThreadSort};
use crate::backend::realtime::Topic;
use crate::backend::server::state::AppState;
use crate::shared::event::WsEvent;
use crate::shared::model::{Post, Thread};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

#[derive(Debug, Deserialize)]
pub struct ThreadListQuery {
    sort: Option<String>,
}

/// `GET /api/v1/boards/{id}/threads?sort=bump|new|old|replies`
pub async fn list_threads(
    State(pool): State<MySqlPool>,
    Path(board_id): Path<String>,
    Query(query): Query<ThreadListQuery>,
) -> Result<Json<ApiResponse<Vec<Thread>>>, ApiError> {
    if db::get_board(&pool, &board_id).await?.is_none() {
        return Err(ApiError::not_found("board not found"));
    }

    let sort = ThreadSort::from_query(query.sort.as_deref());
    let threads = db::threads_by_board(&pool, &board_id, sort).await?;
    Ok(ApiResponse::ok(threads))
}

/// A thread together with its materialized post tree.
#[derive(Debug, Serialize)]
pub struct ThreadView {
    #[serde(flatten)]
    pub thread: Thread,
    pub posts: Vec<Post>,
}

/// `GET /api/v1/threads/{id}`
///
/// Posts come back in display order (pre-order, depth assigned).
pub async fn get_thread(
    State(pool): State<MySqlPool>,
    Path(thread_id): Path<i64>,
) -> Result<Json<ApiResponse<ThreadView>>, ApiError> {
    let mut thread = db::get_thread(&pool, thread_id)
        .await?
        .ok_or_else(|| ApiError::not_found("thread not found"))?;

    let posts = db::posts_by_thread(&pool, thread_id).await?;
    thread.post_count = posts.len() as i64;

    Ok(ApiResponse::ok(ThreadView { thread, posts }))
}

#[derive(Debug, Deserialize)]
pub struct CreateThreadRequest {
    pub board_id: String,
    pub subject: String,
    #[serde(default)]
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub media_path: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// `POST /api/v1/threads`
///
/// Creates the thread and its opening post, then announces the thread
/// to listeners of the board. The database writes complete before the
/// publish; publish failures never fail the request.
pub async fn create_thread(
    State(state): State<AppState>,
    Json(request): Json<CreateThreadRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let subject = request.subject.trim().to_string();
    let content = request.content.trim().to_string();
    let author = {
        let trimmed = request.author.trim();
        if trimmed.is_empty() {
            "Anonymous".to_string()
        } else {
            trimmed.to_string()
        }
    };

    if request.board_id.is_empty() || subject.is_empty() || content.is_empty() {
        return Err(ApiError::bad_request(
            "board_id, subject and content are required",
        ));
    }

    if db::get_board(&state.db_pool, &request.board_id).await?.is_none() {
        return Err(ApiError::not_found("board not found"));
    }

    let thread_id = db::create_thread(&state.db_pool, &request.board_id, &subject).await?;
    let post_id = db::create_post(
        &state.db_pool,
        thread_id,
        None,
        &author,
        &content,
        request.media_path.as_deref(),
        request.media_type.as_deref(),
    )
    .await?;

    tracing::info!("[API] thread #{} created on /{}/", thread_id, request.board_id);

    state.hub.publish(
        &Topic::Board(request.board_id.clone()),
        &WsEvent::new_thread(thread_id, &request.board_id),
    );

    Ok(ApiResponse::ok(serde_json::json!({
        "thread_id": thread_id,
        "post_id": post_id,
    })))
}
