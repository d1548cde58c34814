use crate::error::StreamError;
use crate::registry::JOB_FIELD;
use redis::aio::ConnectionManager;
use serde::Serialize;
use tracing::debug;

/// Appends JSON entries to one stream. Cheap to clone.
#[derive(Clone)]
pub struct StreamProducer {
    redis: ConnectionManager,
    stream_name: String,
    max_length: i64,
}

impl StreamProducer {
    pub fn new(redis: ConnectionManager, stream_name: impl Into<String>) -> Self {
        Self {
            redis,
            stream_name: stream_name.into(),
            max_length: 100_000,
        }
    }

    pub fn with_max_length(mut self, max_length: i64) -> Self {
        self.max_length = max_length;
        self
    }

    /// `XADD <stream> MAXLEN ~ <n> * job <json>`; returns the entry ID.
    pub async fn send<J: Serialize>(&self, job: &J) -> Result<String, StreamError> {
        let body = serde_json::to_string(job)?;
        let mut conn = self.redis.clone();

        let stream_id: String = redis::cmd("XADD")
            .arg(&self.stream_name)
            .arg("MAXLEN")
            .arg("~")
            .arg(self.max_length)
            .arg("*")
            .arg(JOB_FIELD)
            .arg(&body)
            .query_async(&mut conn)
            .await?;

        debug!(stream = %self.stream_name, stream_id = %stream_id, "Appended entry");
        Ok(stream_id)
    }
}
