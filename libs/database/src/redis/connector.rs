use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use crate::common::{RetryConfig, retry_with_backoff};

/// Open a `ConnectionManager` and verify it with `PING`.
///
/// The manager reconnects on its own after the initial handshake.
pub async fn connect(url: &str) -> redis::RedisResult<ConnectionManager> {
    let client = Client::open(url)?;
    let manager = ConnectionManager::new(client).await?;

    let mut conn = manager.clone();
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;

    info!("Connected to Redis");
    Ok(manager)
}

pub async fn connect_with_retry(
    url: &str,
    retry_config: Option<RetryConfig>,
) -> redis::RedisResult<ConnectionManager> {
    retry_with_backoff(|| connect(url), retry_config.unwrap_or_default()).await
}
