use std::sync::Arc;

use crate::{
    error::{NotificationError, NotificationResult},
    models::{NOTIFICATION_EVENT, NewNotification, Notification},
    repository::NotificationRepository,
};

/// Notification use cases
pub struct NotificationService<R: NotificationRepository> {
    repository: Arc<R>,
}

fn check_user_id(user_id: i64) -> NotificationResult<()> {
    if user_id <= 0 {
        return Err(NotificationError::Validation("invalid user id".to_string()));
    }
    Ok(())
}

impl<R: NotificationRepository> NotificationService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn from_arc(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_notification(
        &self,
        user_id: i64,
        message: &str,
    ) -> NotificationResult<Notification> {
        check_user_id(user_id)?;
        if message.trim().is_empty() {
            return Err(NotificationError::Validation(
                "empty notification message".to_string(),
            ));
        }

        let notification = self
            .repository
            .create(NewNotification {
                user_id,
                message: message.to_string(),
                event: NOTIFICATION_EVENT.to_string(),
            })
            .await?;

        tracing::info!(
            notification_id = notification.id,
            user_id,
            "Created notification"
        );
        Ok(notification)
    }

    pub async fn get_all_notifications(&self, user_id: i64) -> NotificationResult<Vec<Notification>> {
        check_user_id(user_id)?;
        self.repository.get_all_by_user_id(user_id).await
    }

    /// Deleting an id that does not exist succeeds
    pub async fn clear_notification(&self, notification_id: i64) -> NotificationResult<()> {
        if notification_id <= 0 {
            return Err(NotificationError::Validation(
                "invalid notification id".to_string(),
            ));
        }
        let removed = self.repository.delete_by_id(notification_id).await?;
        tracing::debug!(notification_id, removed, "Cleared notification");
        Ok(())
    }

    pub async fn clear_all_notifications(&self, user_id: i64) -> NotificationResult<()> {
        check_user_id(user_id)?;
        let removed = self.repository.delete_all_by_user_id(user_id).await?;
        tracing::debug!(user_id, removed, "Cleared notifications");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockNotificationRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_stores_notification_event() {
        let mut mock = MockNotificationRepository::new();
        mock.expect_create()
            .with(eq(NewNotification {
                user_id: 7,
                message: "hello".to_string(),
                event: "notification".to_string(),
            }))
            .times(1)
            .returning(|input| {
                Ok(Notification {
                    id: 1,
                    user_id: input.user_id,
                    message: input.message,
                    event: input.event,
                    created_at: Utc::now(),
                })
            });

        let service = NotificationService::new(mock);
        let created = service.create_notification(7, "hello").await.unwrap();
        assert_eq!(created.event, "notification");
    }

    #[tokio::test]
    async fn test_invalid_ids_never_reach_storage() {
        let mut mock = MockNotificationRepository::new();
        mock.expect_create().never();
        mock.expect_get_all_by_user_id().never();
        mock.expect_delete_by_id().never();
        mock.expect_delete_all_by_user_id().never();
        let service = NotificationService::new(mock);

        let err = service.create_notification(0, "hello").await.unwrap_err();
        assert_eq!(err.to_string(), "invalid user id");

        let err = service.get_all_notifications(-1).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid user id");

        let err = service.clear_notification(0).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid notification id");

        let err = service.clear_all_notifications(0).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid user id");
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let mut mock = MockNotificationRepository::new();
        mock.expect_create().never();
        let service = NotificationService::new(mock);

        let err = service.create_notification(7, "   ").await.unwrap_err();
        assert!(matches!(err, NotificationError::Validation(_)));
        assert_eq!(err.to_string(), "empty notification message");
    }

    #[tokio::test]
    async fn test_clear_missing_is_success() {
        let mut mock = MockNotificationRepository::new();
        mock.expect_delete_by_id()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(0));
        mock.expect_delete_all_by_user_id()
            .with(eq(9))
            .times(1)
            .returning(|_| Ok(0));
        let service = NotificationService::new(mock);

        service.clear_notification(42).await.unwrap();
        service.clear_all_notifications(9).await.unwrap();
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal() {
        let mut mock = MockNotificationRepository::new();
        mock.expect_get_all_by_user_id()
            .returning(|_| Err(NotificationError::Internal("connection refused".into())));
        let service = NotificationService::new(mock);

        let err = service.get_all_notifications(3).await.unwrap_err();
        assert_eq!(err.to_string(), "internal server error");
    }
}
