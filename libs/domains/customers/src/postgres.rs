use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
};

use crate::{
    entity,
    error::{CustomerError, CustomerResult},
    models::{Customer, NewCustomer},
    repository::CustomerRepository,
};

#[derive(Clone)]
pub struct PgCustomerRepository {
    db: DatabaseConnection,
}

impl PgCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> CustomerError {
    CustomerError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn create(&self, input: NewCustomer) -> CustomerResult<Customer> {
        let now = Utc::now();
        let model = entity::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email.clone()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                CustomerError::DuplicateEmail(input.email)
            }
            _ => internal(e),
        })?;

        Ok(inserted.into())
    }

    async fn get_by_id(&self, id: i64) -> CustomerResult<Option<Customer>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> CustomerResult<Option<Customer>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(model.map(Into::into))
    }
}
