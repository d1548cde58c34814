use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{NotificationError, NotificationResult},
    models::{NewNotification, Notification},
    repository::NotificationRepository,
};

#[derive(Clone)]
pub struct PgNotificationRepository {
    db: DatabaseConnection,
}

impl PgNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> NotificationError {
    NotificationError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, input: NewNotification) -> NotificationResult<Notification> {
        let model = entity::ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id),
            message: Set(input.message),
            event: Set(input.event),
            created_at: Set(Utc::now().into()),
        };

        let inserted = model.insert(&self.db).await.map_err(internal)?;
        Ok(inserted.into())
    }

    async fn get_all_by_user_id(&self, user_id: i64) -> NotificationResult<Vec<Notification>> {
        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete_by_id(&self, id: i64) -> NotificationResult<u64> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;
        Ok(result.rows_affected)
    }

    async fn delete_all_by_user_id(&self, user_id: i64) -> NotificationResult<u64> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(internal)?;
        Ok(result.rows_affected)
    }
}
