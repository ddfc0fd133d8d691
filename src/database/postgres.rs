use anyhow::{anyhow, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::Config;

pub type DbPool = PgPool;

/// Create a new PostgreSQL connection pool. Errors if no DATABASE_URL is
/// configured; callers treat the database as optional.
pub async fn create_pool(config: &Config) -> Result<DbPool> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow!("DATABASE_URL is not configured"))?;

    let pool = PgPoolOptions::new()
        .max_connections(25)
        .min_connections(5)
        .idle_timeout(std::time::Duration::from_secs(30))
        .max_lifetime(std::time::Duration::from_secs(600))
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect(url)
        .await?;

    info!("Connected to PostgreSQL database");
    Ok(pool)
}
