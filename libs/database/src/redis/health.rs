use redis::aio::ConnectionManager;

use crate::common::{DatabaseError, DatabaseResult};

/// `PING`, expecting `PONG`
pub async fn check_health(conn: &mut ConnectionManager) -> DatabaseResult<()> {
    let reply: String = redis::cmd("PING")
        .query_async(conn)
        .await
        .map_err(|e| DatabaseError::unhealthy("redis", e))?;

    match reply.as_str() {
        "PONG" => Ok(()),
        other => Err(DatabaseError::unhealthy(
            "redis",
            format!("unexpected PING reply {other:?}"),
        )),
    }
}
