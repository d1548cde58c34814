//! Bridge between the resource use cases and the notification queue.

use crate::error::{NotificationError, NotificationResult};
use crate::models::NotificationEvent;
use crate::processor::NotificationProcessor;
use crate::repository::NotificationRepository;
use crate::streams::NotificationStream;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use stream_worker::{StreamConsumer, StreamDef, StreamProducer, StreamWorker, WorkerConfig};
use tokio::sync::watch;
use tracing::{info, warn};

/// Outbound half of the queue, as seen by use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(&self, event: &NotificationEvent) -> NotificationResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierState {
    /// Built but the queue is not declared yet
    Disconnected,
    /// Queue and consumer group exist
    Connected,
    /// A consume loop is running
    Listening,
    /// Terminal; publish and listen fail
    Closed,
}

struct Inner {
    redis: Mutex<Option<ConnectionManager>>,
    state: Mutex<NotifierState>,
    stop: watch::Sender<bool>,
    config: WorkerConfig,
}

/// Redis Streams notifier. Clones share one connection and one lifecycle.
///
/// ```ignore
/// let notifier = RedisNotifier::new(redis);
/// notifier.connect().await?;
/// tokio::spawn({
///     let notifier = notifier.clone();
///     async move { notifier.listen(repository).await }
/// });
/// notifier.publish(&NotificationEvent::new(1, "hello")).await?;
/// notifier.close();
/// ```
#[derive(Clone)]
pub struct RedisNotifier {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RedisNotifier {
    pub fn new(redis: ConnectionManager) -> Self {
        Self::with_config(
            redis,
            WorkerConfig::from_stream_def::<NotificationStream>(),
        )
    }

    pub fn with_config(redis: ConnectionManager, config: WorkerConfig) -> Self {
        let (stop, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                redis: Mutex::new(Some(redis)),
                state: Mutex::new(NotifierState::Disconnected),
                stop,
                config,
            }),
        }
    }

    pub fn state(&self) -> NotifierState {
        *lock(&self.inner.state)
    }

    fn connection(&self) -> Option<ConnectionManager> {
        lock(&self.inner.redis).clone()
    }

    /// Declare the stream and its consumer group.
    ///
    /// Entries published after this point survive until a consumer reads
    /// them, even if no listener is running yet.
    pub async fn connect(&self) -> NotificationResult<()> {
        let redis = self
            .connection()
            .ok_or_else(|| NotificationError::Queue("notifier is closed".to_string()))?;

        StreamConsumer::new(redis, self.inner.config.clone())
            .init_consumer_group()
            .await?;

        let mut state = lock(&self.inner.state);
        if *state == NotifierState::Disconnected {
            *state = NotifierState::Connected;
        }
        info!(
            stream = %self.inner.config.stream_name,
            group = %self.inner.config.consumer_group,
            "Notification queue declared"
        );
        Ok(())
    }

    /// Run the consume loop until [`close`](Self::close) is called.
    ///
    /// Entries are acknowledged on receipt and handed one at a time to a
    /// [`NotificationProcessor`]; a bad entry never ends the loop.
    pub async fn listen<R>(&self, repository: Arc<R>) -> NotificationResult<()>
    where
        R: NotificationRepository + 'static,
    {
        let redis = {
            let mut state = lock(&self.inner.state);
            match *state {
                NotifierState::Connected => {}
                NotifierState::Disconnected => {
                    return Err(NotificationError::Queue(
                        "notifier is not connected".to_string(),
                    ));
                }
                NotifierState::Listening => {
                    return Err(NotificationError::Queue(
                        "notifier is already listening".to_string(),
                    ));
                }
                NotifierState::Closed => {
                    return Err(NotificationError::Queue("notifier is closed".to_string()));
                }
            }
            let redis = self
                .connection()
                .ok_or_else(|| NotificationError::Queue("notifier is closed".to_string()))?;
            *state = NotifierState::Listening;
            redis
        };

        let worker = StreamWorker::new(redis, self.inner.config.clone());
        let processor = NotificationProcessor::new(repository);
        let result = worker.run(&processor, self.inner.stop.subscribe()).await;

        {
            let mut state = lock(&self.inner.state);
            if *state == NotifierState::Listening {
                *state = NotifierState::Connected;
            }
        }

        result.map_err(Into::into)
    }

    /// Stop any consume loop and drop the connection. Idempotent.
    pub fn close(&self) {
        let previous = std::mem::replace(&mut *lock(&self.inner.state), NotifierState::Closed);
        if previous == NotifierState::Closed {
            return;
        }

        self.inner.stop.send_replace(true);
        lock(&self.inner.redis).take();
        info!(?previous, "Notifier closed");
    }
}

#[async_trait]
impl NotificationPublisher for RedisNotifier {
    async fn publish(&self, event: &NotificationEvent) -> NotificationResult<()> {
        match self.state() {
            NotifierState::Connected | NotifierState::Listening => {}
            NotifierState::Disconnected => {
                return Err(NotificationError::Publish(
                    "notifier is not connected".to_string(),
                ));
            }
            NotifierState::Closed => {
                return Err(NotificationError::Publish("notifier is closed".to_string()));
            }
        }

        let redis = self
            .connection()
            .ok_or_else(|| NotificationError::Publish("notifier is closed".to_string()))?;

        let producer = StreamProducer::new(redis, self.inner.config.stream_name.clone())
            .with_max_length(NotificationStream::MAX_LENGTH);
        producer.send(event).await.map_err(|e| {
            warn!(error = %e, user_id = event.user_id, "Publish failed");
            NotificationError::Publish(e.to_string())
        })?;
        Ok(())
    }
}
