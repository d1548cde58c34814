//! Data models for the notifications domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Event kind carried by every notification this service creates or accepts
pub const NOTIFICATION_EVENT: &str = "notification";

/// A persisted notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub event: String,
    pub created_at: DateTime<Utc>,
}

/// Row handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: i64,
    pub message: String,
    pub event: String,
}

/// Request body for `POST /users/{id}/notifications`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNotification {
    #[validate(length(max = 4096, message = "must be at most 4096 characters"))]
    pub message: String,
}

/// Queue message body, stored under the stream entry's `job` field.
///
/// ```json
/// {"event": "notification", "user_id": 123, "message": "added resource aws_vpc_main ..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub event: String,
    pub user_id: i64,
    pub message: String,
}

impl NotificationEvent {
    pub fn new(user_id: i64, message: impl Into<String>) -> Self {
        Self {
            event: NOTIFICATION_EVENT.to_string(),
            user_id,
            message: message.into(),
        }
    }

    /// Only notification events for a real user with a message are stored
    pub fn is_qualifying(&self) -> bool {
        self.event == NOTIFICATION_EVENT && self.user_id != 0 && !self.message.is_empty()
    }
}

impl From<NotificationEvent> for NewNotification {
    fn from(event: NotificationEvent) -> Self {
        Self {
            user_id: event.user_id,
            message: event.message,
            event: event.event,
        }
    }
}
