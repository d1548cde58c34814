//! Stream definitions for the notifications domain.

use stream_worker::StreamDef;

/// Durable queue between resource assignment and notification storage
pub struct NotificationStream;

impl StreamDef for NotificationStream {
    const STREAM_NAME: &'static str = "notifications";
    const CONSUMER_GROUP: &'static str = "notification_workers";
}
