use crate::config::WorkerConfig;
use crate::error::StreamError;
use crate::event::StreamEvent;
use crate::registry::JOB_FIELD;
use redis::RedisResult;
use redis::aio::ConnectionManager;
use tracing::{debug, info, warn};

type StreamReply = Vec<(String, Vec<(String, Vec<(String, String)>)>)>;

/// Consumer-group reads against a single stream
#[derive(Clone)]
pub struct StreamConsumer {
    redis: ConnectionManager,
    config: WorkerConfig,
}

impl StreamConsumer {
    pub fn new(redis: ConnectionManager, config: WorkerConfig) -> Self {
        Self { redis, config }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// `XGROUP CREATE ... 0 MKSTREAM`, tolerating an existing group.
    ///
    /// Creating the stream here makes it durable before the first producer
    /// writes to it.
    pub async fn init_consumer_group(&self) -> Result<(), StreamError> {
        let mut conn = self.redis.clone();

        let result: RedisResult<()> = redis::cmd("XGROUP")
            .arg("CREATE")
            .arg(&self.config.stream_name)
            .arg(&self.config.consumer_group)
            .arg("0")
            .arg("MKSTREAM")
            .query_async(&mut conn)
            .await;

        match result {
            Ok(()) => {
                info!(
                    stream = %self.config.stream_name,
                    group = %self.config.consumer_group,
                    "Created consumer group"
                );
                Ok(())
            }
            Err(e) if e.to_string().contains("BUSYGROUP") => {
                debug!(group = %self.config.consumer_group, "Consumer group already exists");
                Ok(())
            }
            Err(e) => Err(StreamError::Redis(e)),
        }
    }

    /// Read entries never delivered to this group (`>`).
    ///
    /// With `ack_on_receipt` the read uses `NOACK`, so a delivered entry is
    /// never redelivered even if its handler fails.
    pub async fn read_new(&self, count: usize) -> Result<Vec<StreamEvent>, StreamError> {
        let mut conn = self.redis.clone();

        let mut cmd = redis::cmd("XREADGROUP");
        cmd.arg("GROUP")
            .arg(&self.config.consumer_group)
            .arg(&self.config.consumer_id)
            .arg("COUNT")
            .arg(count);
        if let Some(timeout) = self.config.blocking_timeout_ms {
            cmd.arg("BLOCK").arg(timeout);
        }
        if self.config.ack_on_receipt {
            cmd.arg("NOACK");
        }
        cmd.arg("STREAMS").arg(&self.config.stream_name).arg(">");

        let reply: Option<StreamReply> = cmd.query_async(&mut conn).await?;
        Ok(reply.map(flatten_reply).unwrap_or_default())
    }

    pub async fn ack(&self, stream_id: &str) -> Result<(), StreamError> {
        let mut conn = self.redis.clone();
        let _: i64 = redis::cmd("XACK")
            .arg(&self.config.stream_name)
            .arg(&self.config.consumer_group)
            .arg(stream_id)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}

fn flatten_reply(streams: StreamReply) -> Vec<StreamEvent> {
    streams
        .into_iter()
        .flat_map(|(_, entries)| parse_entries(entries))
        .collect()
}

/// Pull the `job` field out of each entry. Entries without it are logged and dropped.
pub(crate) fn parse_entries(entries: Vec<(String, Vec<(String, String)>)>) -> Vec<StreamEvent> {
    entries
        .into_iter()
        .filter_map(|(stream_id, fields)| {
            let payload = fields
                .iter()
                .find(|(key, _)| key == JOB_FIELD)
                .map(|(_, value)| value.clone());

            if payload.is_none() {
                warn!(
                    stream_id = %stream_id,
                    fields = ?fields.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
                    "Entry has no job field, skipping"
                );
            }
            payload.map(|payload| StreamEvent::new(stream_id, payload))
        })
        .collect()
}
