//! Integration tests for the notifications domain against PostgreSQL

use domain_notifications::*;
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
#[ignore] // Requires Docker
async fn test_notification_crud() {
    let db = TestDatabase::new().await;
    let service = NotificationService::new(PgNotificationRepository::new(db.connection()));
    let user_id = TestDataBuilder::from_test_name("notification_crud").user_id();

    let first = service.create_notification(user_id, "first").await.unwrap();
    service.create_notification(user_id, "second").await.unwrap();
    service.create_notification(user_id + 1, "other").await.unwrap();

    let listed = service.get_all_notifications(user_id).await.unwrap();
    let messages: Vec<_> = listed.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second"]);

    service.clear_notification(first.id).await.unwrap();
    service.clear_notification(first.id).await.unwrap();
    assert_eq!(service.get_all_notifications(user_id).await.unwrap().len(), 1);

    service.clear_all_notifications(user_id).await.unwrap();
    service.clear_all_notifications(user_id).await.unwrap();
    assert!(service.get_all_notifications(user_id).await.unwrap().is_empty());
    assert_eq!(
        service.get_all_notifications(user_id + 1).await.unwrap().len(),
        1
    );
}
