//! Notifications Domain
//!
//! Stores per-user notifications and carries assignment events from the
//! inventory API to the notification service over a Redis stream.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ Resource UseCase │  ← NotificationPublisher::publish (best effort)
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │   Redis Stream   │  ← "notifications", group "notification_workers"
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │  RedisNotifier   │  ← listen(): ack on receipt, one entry at a time
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │    Processor     │  ← decode, filter, store
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │    Repository    │  ← in-memory or PostgreSQL
//! └──────────────────┘
//! ```
//!
//! The HTTP handlers sit on [`NotificationService`] over the same repository.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notifier;
pub mod postgres;
pub mod processor;
pub mod repository;
pub mod service;
pub mod streams;

pub use error::{NotificationError, NotificationResult};
pub use models::{
    CreateNotification, NOTIFICATION_EVENT, NewNotification, Notification, NotificationEvent,
};
pub use notifier::{NotificationPublisher, NotifierState, RedisNotifier};
pub use postgres::PgNotificationRepository;
pub use processor::{NotificationProcessor, Outcome};
pub use repository::{InMemoryNotificationRepository, NotificationRepository};
pub use service::NotificationService;
pub use streams::NotificationStream;
