//! Notification Service - Entry Point
//!
//! Consumes the `notifications` stream and serves the notification endpoints.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    notification_service::run().await
}
