//! Queue tests for the notifier
//!
//! Run against a real Redis via testcontainers.

use domain_notifications::*;
use std::sync::Arc;
use std::time::Duration;
use stream_worker::WorkerConfig;
use test_utils::TestRedis;

fn test_config() -> WorkerConfig {
    WorkerConfig::from_stream_def::<NotificationStream>().with_consumer_id("test-consumer")
}

async fn wait_for_notifications(
    repo: &InMemoryNotificationRepository,
    user_id: i64,
    expected: usize,
) -> Vec<Notification> {
    for _ in 0..50 {
        let found = repo.get_all_by_user_id(user_id).await.unwrap();
        if found.len() >= expected {
            return found;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    repo.get_all_by_user_id(user_id).await.unwrap()
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_publish_then_consume_stores_notification() {
    let redis = TestRedis::new().await;
    let notifier = RedisNotifier::with_config(redis.connection_manager().await, test_config());
    notifier.connect().await.unwrap();
    assert_eq!(notifier.state(), NotifierState::Connected);

    let repo = InMemoryNotificationRepository::new();
    let listener = tokio::spawn({
        let notifier = notifier.clone();
        let repo = Arc::new(repo.clone());
        async move { notifier.listen(repo).await }
    });

    let message = "added resource aws_vpc_main for customer with customerID 123";
    notifier
        .publish(&NotificationEvent::new(123, message))
        .await
        .unwrap();

    let stored = wait_for_notifications(&repo, 123, 1).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].message, message);

    notifier.close();
    listener.await.unwrap().unwrap();
    assert_eq!(notifier.state(), NotifierState::Closed);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_idle_listener_still_stores_later_publish() {
    let redis = TestRedis::new().await;
    let conn = redis.connection_manager().await;
    let notifier = RedisNotifier::new(conn.clone());
    notifier.connect().await.unwrap();

    let repo = InMemoryNotificationRepository::new();
    let listener = tokio::spawn({
        let notifier = notifier.clone();
        let repo = Arc::new(repo.clone());
        async move { notifier.listen(repo).await }
    });

    // Longer than the connection's response timeout
    tokio::time::sleep(Duration::from_secs(3)).await;

    // The shared connection keeps answering while the listener idles
    let mut ping_conn = conn.clone();
    let pong: String = tokio::time::timeout(
        Duration::from_millis(500),
        redis::cmd("PING").query_async::<String>(&mut ping_conn),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(pong, "PONG");

    notifier
        .publish(&NotificationEvent::new(42, "after a quiet spell"))
        .await
        .unwrap();

    let stored = wait_for_notifications(&repo, 42, 1).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].message, "after a quiet spell");

    notifier.close();
    listener.await.unwrap().unwrap();
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_entries_published_before_listen_are_delivered() {
    let redis = TestRedis::new().await;
    let notifier = RedisNotifier::with_config(redis.connection_manager().await, test_config());
    notifier.connect().await.unwrap();

    notifier
        .publish(&NotificationEvent::new(7, "queued early"))
        .await
        .unwrap();

    let repo = InMemoryNotificationRepository::new();
    let listener = tokio::spawn({
        let notifier = notifier.clone();
        let repo = Arc::new(repo.clone());
        async move { notifier.listen(repo).await }
    });

    let stored = wait_for_notifications(&repo, 7, 1).await;
    assert_eq!(stored.len(), 1);

    notifier.close();
    listener.await.unwrap().unwrap();
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_bad_entries_do_not_stop_the_loop() {
    let redis = TestRedis::new().await;
    let notifier = RedisNotifier::with_config(redis.connection_manager().await, test_config());
    notifier.connect().await.unwrap();

    let repo = InMemoryNotificationRepository::new();
    let listener = tokio::spawn({
        let notifier = notifier.clone();
        let repo = Arc::new(repo.clone());
        async move { notifier.listen(repo).await }
    });

    let mut conn = redis.connection_manager().await;
    let _: String = redis::cmd("XADD")
        .arg("notifications")
        .arg("*")
        .arg("job")
        .arg("definitely not json")
        .query_async(&mut conn)
        .await
        .unwrap();

    let ignored = NotificationEvent {
        event: "resource_deleted".to_string(),
        ..NotificationEvent::new(9, "nope")
    };
    notifier.publish(&ignored).await.unwrap();
    notifier
        .publish(&NotificationEvent::new(9, ""))
        .await
        .unwrap();
    notifier
        .publish(&NotificationEvent::new(9, "kept"))
        .await
        .unwrap();

    let stored = wait_for_notifications(&repo, 9, 1).await;
    let messages: Vec<_> = stored.into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["kept"]);

    notifier.close();
    listener.await.unwrap().unwrap();
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_lifecycle_rules() {
    let redis = TestRedis::new().await;
    let notifier = RedisNotifier::with_config(redis.connection_manager().await, test_config());
    assert_eq!(notifier.state(), NotifierState::Disconnected);

    let err = notifier
        .publish(&NotificationEvent::new(1, "early"))
        .await
        .unwrap_err();
    assert!(matches!(err, NotificationError::Publish(_)));

    // Closing before setup completed is fine, and so is closing twice
    notifier.close();
    notifier.close();
    assert_eq!(notifier.state(), NotifierState::Closed);

    let err = notifier
        .publish(&NotificationEvent::new(1, "late"))
        .await
        .unwrap_err();
    assert!(matches!(err, NotificationError::Publish(_)));

    let err = notifier
        .listen(Arc::new(InMemoryNotificationRepository::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, NotificationError::Queue(_)));
}
