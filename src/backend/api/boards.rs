/**
 * Board Endpoints
 *
 * - `GET  /api/v1/boards`        - list all boards
 * - `POST /api/v1/boards`        - create a board
 * - `GET  /api/v1/boards/{id}`   - fetch one board
 */
use crate::backend::api::ApiResponse;
use crate::backend::error::ApiError;
use crate::backend::forum::db;
use crate::backend::realtime::{Hub, Topic};
use crate::backend::server::state::AppState;
use crate::shared::event::WsEvent;
use crate::shared::model::Board;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use sqlx::MySqlPool;

/// `GET /api/v1/boards`
pub async fn list_boards(
    State(pool): State<MySqlPool>,
) -> Result<Json<ApiResponse<Vec<Board>>>, ApiError> {
    let boards = db::list_boards(&pool).await?;
    Ok(ApiResponse::ok(boards))
}

/// `GET /api/v1/boards/{id}`
pub async fn get_board(
    State(pool): State<MySqlPool>,
    Path(board_id): Path<String>,
) -> Result<Json<ApiResponse<Board>>, ApiError> {
    let board = db::get_board(&pool, &board_id)
        .await?
        .ok_or_else(|| ApiError::not_found("board not found"))?;
    Ok(ApiResponse::ok(board))
}

#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// `POST /api/v1/boards`
///
/// The slug is lowercased and must be non-empty ASCII `[a-z0-9]`.
/// Creating an existing slug is a 409.
pub async fn create_board(
    State(state): State<AppState>,
    Json(request): Json<CreateBoardRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let id = request.id.trim().to_lowercase();
    let name = request.name.trim().to_string();
    let description = request.description.trim().to_string();

    if id.is_empty() || name.is_empty() {
        return Err(ApiError::bad_request("id and name are required"));
    }
    if !id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
        return Err(ApiError::bad_request(
            "id may contain only latin letters and digits",
        ));
    }

    if db::get_board(&state.db_pool, &id).await?.is_some() {
        return Err(ApiError::conflict("a board with this id already exists"));
    }

    db::create_board(&state.db_pool, &id, &name, &description).await?;
    tracing::info!("[API] board /{}/ created", id);

    publish_new_board(&state.hub, &id);

    Ok(ApiResponse::ok(serde_json::json!({ "id": id })))
}

/// Announce a new board to front-page listeners. Best-effort.
fn publish_new_board(hub: &Hub, board_id: &str) {
    hub.publish(&Topic::Home, &WsEvent::new_board(board_id));
}
