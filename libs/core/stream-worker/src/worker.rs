use crate::config::WorkerConfig;
use crate::consumer::StreamConsumer;
use crate::error::{ErrorCategory, StreamError};
use crate::registry::StreamHandler;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Single-task read loop over one consumer group.
///
/// Entries are handed to the handler one at a time in delivery order. Empty
/// non-blocking reads wait `poll_interval_ms` before the next one. Broker
/// errors back off exponentially and the loop keeps going; the underlying
/// `ConnectionManager` reconnects on its own.
pub struct StreamWorker {
    consumer: StreamConsumer,
}

impl StreamWorker {
    pub fn new(redis: ConnectionManager, config: WorkerConfig) -> Self {
        Self {
            consumer: StreamConsumer::new(redis, config),
        }
    }

    /// Run until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run<H: StreamHandler>(
        &self,
        handler: &H,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), StreamError> {
        let config = self.consumer.config();
        info!(
            stream = %config.stream_name,
            group = %config.consumer_group,
            consumer_id = %config.consumer_id,
            "Starting stream worker"
        );

        let mut group_ready = false;
        let mut consecutive_errors: u32 = 0;

        loop {
            if *shutdown.borrow() {
                break;
            }

            let step = async {
                if !group_ready {
                    self.consumer.init_consumer_group().await?;
                }
                self.consumer.read_new(config.batch_size).await
            };

            let result = tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
                result = step => result,
            };

            match result {
                Ok(events) => {
                    group_ready = true;
                    if consecutive_errors > 0 {
                        info!(consecutive_errors, "Stream connection recovered");
                        consecutive_errors = 0;
                    }
                    if events.is_empty() && config.blocking_timeout_ms.is_none() {
                        tokio::select! {
                            changed = shutdown.changed() => {
                                if changed.is_err() || *shutdown.borrow() {
                                    break;
                                }
                            }
                            _ = tokio::time::sleep(Duration::from_millis(config.poll_interval_ms)) => {}
                        }
                        continue;
                    }
                    for event in events {
                        let stream_id = event.stream_id.clone();
                        debug!(stream_id = %stream_id, "Dispatching entry");
                        handler.handle(event).await;
                        if !config.ack_on_receipt
                            && let Err(e) = self.consumer.ack(&stream_id).await
                        {
                            warn!(error = %e, stream_id = %stream_id, "Ack failed");
                        }
                    }
                }
                Err(e) if e.category() == ErrorCategory::Permanent => {
                    error!(error = %e, "Stream worker stopping");
                    return Err(e);
                }
                Err(e) => {
                    consecutive_errors = consecutive_errors.saturating_add(1);
                    if e.is_nogroup() {
                        group_ready = false;
                    }
                    let backoff_ms = config.backoff_ms(consecutive_errors);
                    warn!(
                        error = %e,
                        consecutive_errors,
                        backoff_ms,
                        "Stream read failed, backing off"
                    );

                    tokio::select! {
                        changed = shutdown.changed() => {
                            if changed.is_err() || *shutdown.borrow() {
                                break;
                            }
                        }
                        _ = tokio::time::sleep(Duration::from_millis(backoff_ms)) => {}
                    }
                }
            }
        }

        info!(stream = %config.stream_name, "Stream worker stopped");
        Ok(())
    }
}
