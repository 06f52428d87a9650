use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database: &DatabaseConfig) -> Result<PgPool> {
    info!(
        "Connecting to PostgreSQL at {}:{}/{}...",
        database.host, database.port, database.name
    );

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(database.connect_options())
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
