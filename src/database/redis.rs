use anyhow::Result;
use deadpool_redis::{Config as RedisConfig, Pool, Runtime};

use crate::config::Config;

/// Create a Redis connection pool and verify it responds. The session
/// snapshot cache degrades gracefully when this fails.
pub async fn create_redis_pool(config: &Config) -> Result<Pool> {
    let cfg = RedisConfig::from_url(config.redis_url());
    let pool = cfg.create_pool(Some(Runtime::Tokio1))?;

    // Fail fast so main can log and continue without Redis
    let mut conn = pool.get().await?;
    redis::cmd("PING")
        .query_async::<_, String>(&mut conn)
        .await?;

    Ok(pool)
}
