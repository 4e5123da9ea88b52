/**
 * Server Configuration
 *
 * Environment-driven configuration for the database connection and
 * the listen port. `DATABASE_URL` wins when set; otherwise the URL is
 * assembled from the individual `DB_*` variables with local-dev
 * defaults.
 */
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// The MySQL connection URL from the environment.
pub fn database_url() -> String {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return url;
    }

    let host = env_or("DB_HOST", "localhost");
    let port = env_or("DB_PORT", "3306");
    let user = env_or("DB_USER", "root");
    let password = env_or("DB_PASSWORD", "");
    let name = env_or("DB_NAME", "treechan");

    if password.is_empty() {
        format!("mysql://{}@{}:{}/{}", user, host, port, name)
    } else {
        format!("mysql://{}:{}@{}:{}/{}", user, password, host, port, name)
    }
}

/// Connect the pool. The forum cannot run without its store, so a
/// connection failure propagates and aborts startup.
pub async fn connect_database() -> Result<MySqlPool, sqlx::Error> {
    let url = database_url();
    tracing::info!("[Config] connecting to database");

    let pool = MySqlPoolOptions::new()
        .max_connections(25)
        .min_connections(5)
        .max_lifetime(Duration::from_secs(5 * 60))
        .connect(&url)
        .await?;

    tracing::info!("[Config] database connection established");
    Ok(pool)
}

/// Listen port, `SERVER_PORT` or 8080.
pub fn server_port() -> u16 {
    env_or("SERVER_PORT", "8080").parse().unwrap_or(8080)
}
