//! Error types for the notifications domain.

use axum::response::{IntoResponse, Response};
use axum_helpers::{ErrorKind, error_response};
use stream_worker::StreamError;
use thiserror::Error;

pub type NotificationResult<T> = Result<T, NotificationError>;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("{0}")]
    Validation(String),

    /// Event could not be handed to the queue
    #[error("failed to publish notification: {0}")]
    Publish(String),

    /// Queue setup or the consume loop failed
    #[error("message queue error: {0}")]
    Queue(String),

    /// Cause is logged, never returned to callers
    #[error("internal server error")]
    Internal(String),
}

impl NotificationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Publish(_) => ErrorKind::Publish,
            Self::Queue(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<StreamError> for NotificationError {
    fn from(err: StreamError) -> Self {
        Self::Queue(err.to_string())
    }
}

impl IntoResponse for NotificationError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(cause) | Self::Queue(cause) => {
                tracing::error!(error = %cause, "Notification request failed");
                error_response(ErrorKind::Internal, "internal server error")
            }
            _ => error_response(self.kind(), self.to_string()),
        }
    }
}
