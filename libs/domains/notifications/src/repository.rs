use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::NotificationResult;
use crate::models::{NewNotification, Notification};

/// Persistence port for notifications
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, input: NewNotification) -> NotificationResult<Notification>;

    /// Oldest first
    async fn get_all_by_user_id(&self, user_id: i64) -> NotificationResult<Vec<Notification>>;

    /// Returns how many rows went away; zero is not an error
    async fn delete_by_id(&self, id: i64) -> NotificationResult<u64>;

    async fn delete_all_by_user_id(&self, user_id: i64) -> NotificationResult<u64>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    notifications: BTreeMap<i64, Notification>,
}

/// In-memory implementation of NotificationRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryNotificationRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, input: NewNotification) -> NotificationResult<Notification> {
        let mut store = self.store.write().await;
        store.next_id += 1;

        let notification = Notification {
            id: store.next_id,
            user_id: input.user_id,
            message: input.message,
            event: input.event,
            created_at: Utc::now(),
        };
        store
            .notifications
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn get_all_by_user_id(&self, user_id: i64) -> NotificationResult<Vec<Notification>> {
        let store = self.store.read().await;
        Ok(store
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> NotificationResult<u64> {
        let removed = self.store.write().await.notifications.remove(&id);
        Ok(removed.map_or(0, |_| 1))
    }

    async fn delete_all_by_user_id(&self, user_id: i64) -> NotificationResult<u64> {
        let mut store = self.store.write().await;
        let before = store.notifications.len();
        store.notifications.retain(|_, n| n.user_id != user_id);
        Ok((before - store.notifications.len()) as u64)
    }
}
