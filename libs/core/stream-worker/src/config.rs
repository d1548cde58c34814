use crate::registry::StreamDef;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub stream_name: String,
    pub consumer_group: String,
    /// Unique per process, generated when not supplied
    pub consumer_id: String,
    pub batch_size: usize,
    /// `BLOCK` argument for `XREADGROUP`; `None` polls every
    /// `poll_interval_ms`. A blocking read must fit inside the connection's
    /// response timeout, otherwise the client gives up on a read the server
    /// still answers and entries read with `NOACK` are lost.
    pub blocking_timeout_ms: Option<u64>,
    pub poll_interval_ms: u64,
    /// Read with `NOACK` so entries are acknowledged on delivery; otherwise
    /// each entry is `XACK`ed after its handler returns
    pub ack_on_receipt: bool,
    /// Read-error backoff bounds
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl WorkerConfig {
    pub fn from_stream_def<S: StreamDef>() -> Self {
        Self::new(S::STREAM_NAME, S::CONSUMER_GROUP).with_poll_interval(S::POLL_INTERVAL_MS)
    }

    pub fn new(stream_name: impl Into<String>, consumer_group: impl Into<String>) -> Self {
        Self {
            stream_name: stream_name.into(),
            consumer_group: consumer_group.into(),
            consumer_id: format!("worker-{}", Uuid::new_v4()),
            batch_size: 1,
            blocking_timeout_ms: None,
            poll_interval_ms: 200,
            ack_on_receipt: true,
            initial_backoff_ms: 500,
            max_backoff_ms: 30_000,
        }
    }

    pub fn with_consumer_id(mut self, id: impl Into<String>) -> Self {
        self.consumer_id = id.into();
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    pub fn with_blocking(mut self, timeout_ms: Option<u64>) -> Self {
        self.blocking_timeout_ms = timeout_ms;
        self
    }

    pub fn with_poll_interval(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    pub fn with_ack_on_receipt(mut self, enabled: bool) -> Self {
        self.ack_on_receipt = enabled;
        self
    }

    pub fn with_backoff(mut self, initial_ms: u64, max_ms: u64) -> Self {
        self.initial_backoff_ms = initial_ms;
        self.max_backoff_ms = max_ms.max(initial_ms);
        self
    }

    /// Delay after `consecutive_errors` failed reads in a row (1-based)
    pub fn backoff_ms(&self, consecutive_errors: u32) -> u64 {
        let exponent = consecutive_errors.saturating_sub(1).min(16);
        self.initial_backoff_ms
            .saturating_mul(2u64.saturating_pow(exponent))
            .min(self.max_backoff_ms)
    }
}
