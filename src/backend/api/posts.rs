/**
 * Post Endpoints
 *
 * - `POST /api/v1/posts` - append a reply to a thread
 *
 * Appending a post is the busiest mutation path: write the post, bump
 * the thread, then notify thread listeners (`new_post`, carrying the
 * post fields) and board listeners (`thread_updated`), in that order.
 */
use crate::backend::api::ApiResponse;
use crate::backend::error::ApiError;
use crate::backend::forum::db;
use crate::backend::realtime::Topic;
use crate::backend::server::state::AppState;
use crate::shared::event::WsEvent;
use crate::shared::model::Post;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub thread_id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub media_path: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// `POST /api/v1/posts`
pub async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let content = request.content.trim().to_string();
    let author = {
        let trimmed = request.author.trim();
        if trimmed.is_empty() {
            "Anonymous".to_string()
        } else {
            trimmed.to_string()
        }
    };

    if request.thread_id <= 0 || content.is_empty() {
        return Err(ApiError::bad_request("thread_id and content are required"));
    }

    let thread = db::get_thread(&state.db_pool, request.thread_id)
        .await?
        .ok_or_else(|| ApiError::not_found("thread not found"))?;

    let post_id = db::create_post(
        &state.db_pool,
        request.thread_id,
        request.parent_id,
        &author,
        &content,
        request.media_path.as_deref(),
        request.media_type.as_deref(),
    )
    .await?;

    db::bump_thread(&state.db_pool, request.thread_id).await?;

    tracing::info!("[API] post #{} appended to thread #{}", post_id, request.thread_id);

    // Prefer the stored row for the event payload (authoritative
    // timestamp); fall back to the request data if the read-back
    // races a deletion.
    let post = match db::get_post(&state.db_pool, post_id).await {
        Ok(Some(post)) => post,
        Ok(None) | Err(_) => Post {
            id: post_id,
            thread_id: request.thread_id,
            parent_id: request.parent_id.filter(|id| *id > 0),
            author: author.clone(),
            content: content.clone(),
            media_path: request.media_path.clone(),
            media_type: request.media_type.clone(),
            created_at: Utc::now(),
            depth: 0,
        },
    };

    state
        .hub
        .publish(&Topic::Thread(request.thread_id), &WsEvent::new_post(&post));
    state.hub.publish(
        &Topic::Board(thread.board_id.clone()),
        &WsEvent::thread_updated(request.thread_id, &thread.board_id),
    );

    Ok(ApiResponse::ok(serde_json::json!({ "post_id": post_id })))
}
