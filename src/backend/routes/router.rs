/**
 * Router Configuration
 *
 * This module assembles all routes into a single Axum router.
 *
 * # Route Details
 *
 * ## REST API
 *
 * - `GET  /api/v1/boards`              - list boards
 * - `POST /api/v1/boards`              - create a board
 * - `GET  /api/v1/boards/{id}`         - fetch a board
 * - `GET  /api/v1/boards/{id}/threads` - list a board's threads
 * - `GET  /api/v1/threads/{id}`        - thread with post tree
 * - `POST /api/v1/threads`             - create a thread
 * - `POST /api/v1/posts`               - append a post
 *
 * ## WebSocket
 *
 * - `GET /ws/thread?thread_id={id}` - live updates for a thread
 * - `GET /ws/board?board_id={id}`   - live updates for a board
 * - `GET /ws/home`                  - front-page updates
 *
 * ## Static Files
 *
 * User-uploaded media is served from the `uploads` directory.
 */
use crate::backend::api::{boards, posts, threads};
use crate::backend::realtime::session;
use crate::backend::server::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

/// Create the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/boards",
            get(boards::list_boards).post(boards::create_board),
        )
        .route("/api/v1/boards/{id}", get(boards::get_board))
        .route("/api/v1/boards/{id}/threads", get(threads::list_threads))
        .route("/api/v1/threads", post(threads::create_thread))
        .route("/api/v1/threads/{id}", get(threads::get_thread))
        .route("/api/v1/posts", post(posts::create_post))
        .route("/ws/thread", get(session::ws_thread))
        .route("/ws/board", get(session::ws_board))
        .route("/ws/home", get(session::ws_home))
        .nest_service("/uploads", ServeDir::new("uploads"))
        .with_state(state)
}
