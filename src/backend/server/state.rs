/**
 * Application State Management
 *
 * `AppState` is the central state container injected into every
 * handler: the database pool and the realtime hub. Both are cheap
 * handles over `Arc`-backed internals, so the state clones freely.
 *
 * Constructing the hub here - once, at startup - and threading it
 * through the state keeps the notification dependency explicit: a
 * test can build an `AppState` (or just a `Hub`) of its own without
 * touching process-wide globals.
 *
 * The `FromRef` implementations let handlers extract only the part
 * they need (`State<MySqlPool>` for read-only endpoints, `State<Hub>`
 * for the WebSocket handlers) following Axum's substate pattern.
 */
use crate::backend::realtime::Hub;
use axum::extract::FromRef;
use sqlx::MySqlPool;

/// Application state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// MySQL connection pool; the authoritative store
    pub db_pool: MySqlPool,
    /// Realtime notification hub
    pub hub: Hub,
}

impl AppState {
    pub fn new(db_pool: MySqlPool, hub: Hub) -> Self {
        Self { db_pool, hub }
    }
}

impl FromRef<AppState> for MySqlPool {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}

impl FromRef<AppState> for Hub {
    fn from_ref(state: &AppState) -> Self {
        state.hub.clone()
    }
}
