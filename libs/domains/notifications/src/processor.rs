//! Turns queue entries into stored notifications.

use crate::models::{NewNotification, NotificationEvent};
use crate::repository::NotificationRepository;
use async_trait::async_trait;
use std::sync::Arc;
use stream_worker::{StreamEvent, StreamHandler};
use tracing::{debug, error, info, warn};

/// What happened to one queue entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Stored under this notification id
    Stored(i64),
    /// Decoded fine but not something we store
    Skipped,
    /// Body was not a notification event
    Malformed,
    /// Storage rejected it; the entry is dropped
    Failed,
}

/// [`StreamHandler`] that persists qualifying notification events.
///
/// Every failure is logged and swallowed: entries are acknowledged on receipt,
/// so there is nothing to retry and the read loop must keep going.
pub struct NotificationProcessor<R: NotificationRepository> {
    repository: Arc<R>,
}

impl<R: NotificationRepository> NotificationProcessor<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn process(&self, payload: &str) -> Outcome {
        let event: NotificationEvent = match serde_json::from_str(payload) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Dropping undecodable notification entry");
                return Outcome::Malformed;
            }
        };

        if !event.is_qualifying() {
            debug!(
                event = %event.event,
                user_id = event.user_id,
                "Skipping non-qualifying entry"
            );
            return Outcome::Skipped;
        }

        let user_id = event.user_id;
        match self.repository.create(NewNotification::from(event)).await {
            Ok(notification) => {
                info!(
                    notification_id = notification.id,
                    user_id, "Stored notification from queue"
                );
                Outcome::Stored(notification.id)
            }
            Err(e) => {
                error!(error = ?e, user_id, "Failed to store notification");
                Outcome::Failed
            }
        }
    }
}

impl<R: NotificationRepository> Clone for NotificationProcessor<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[async_trait]
impl<R: NotificationRepository + 'static> StreamHandler for NotificationProcessor<R> {
    async fn handle(&self, event: StreamEvent) {
        let outcome = self.process(&event.payload).await;
        debug!(stream_id = %event.stream_id, ?outcome, "Handled entry");
    }
}
