use crate::event::StreamEvent;
use async_trait::async_trait;

/// Field that carries the JSON body of every entry
pub const JOB_FIELD: &str = "job";

/// Static description of a stream and the group that reads it.
pub trait StreamDef: Send + Sync {
    const STREAM_NAME: &'static str;
    const CONSUMER_GROUP: &'static str;

    /// Approximate cap applied with `XADD ... MAXLEN ~`
    const MAX_LENGTH: i64 = 100_000;

    /// Pause between reads that came back empty
    const POLL_INTERVAL_MS: u64 = 200;
}

/// Receives entries from [`crate::StreamWorker`].
///
/// Handlers own their failure policy: the worker never retries an entry and
/// never stops because a handler failed.
#[async_trait]
pub trait StreamHandler: Send + Sync {
    async fn handle(&self, event: StreamEvent);
}
