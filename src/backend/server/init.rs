/**
 * Server Initialization
 *
 * App construction: connect the database, bootstrap the schema, build
 * the hub and state, assemble the router.
 *
 * # Initialization Process
 *
 * 1. Connect the MySQL pool (fatal on failure - the store is the
 *    source of truth)
 * 2. Create tables if they do not exist yet
 * 3. Create the process-wide realtime hub
 * 4. Build `AppState` and the router
 */
use crate::backend::forum::db;
use crate::backend::realtime::Hub;
use crate::backend::routes::router::create_router;
use crate::backend::server::config;
use crate::backend::server::state::AppState;
use axum::Router;

/// Create and configure the Axum application.
pub async fn create_app() -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing treechan backend server");

    let db_pool = config::connect_database().await?;
    db::init_schema(&db_pool).await?;

    // One hub for the whole process, injected via AppState.
    let hub = Hub::new();

    let state = AppState::new(db_pool, hub);
    Ok(create_router(state))
}
