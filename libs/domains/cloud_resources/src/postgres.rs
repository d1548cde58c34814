use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, QueryFilter, QueryOrder, SqlErr, Statement, TransactionTrait,
};

use crate::{
    customer_resource, entity,
    error::{CloudResourceError, CloudResourceResult},
    models::{CloudResource, UpdateCloudResource},
    repository::CloudResourceRepository,
};

#[derive(Clone)]
pub struct PgCloudResourceRepository {
    db: DatabaseConnection,
}

impl PgCloudResourceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(e: DbErr) -> CloudResourceError {
    CloudResourceError::Internal(format!("Database error: {}", e))
}

/// Insert one edge on `conn`. Shared by the single and the transactional bulk path.
async fn assign<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    customer_id: i64,
) -> CloudResourceResult<CloudResource> {
    let resource = entity::Entity::find()
        .filter(entity::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(internal)?
        .ok_or_else(|| CloudResourceError::UnknownResource(name.to_string()))?;

    let edge = customer_resource::ActiveModel {
        customer_id: Set(customer_id),
        resource_id: Set(resource.id),
        created_at: Set(Utc::now().into()),
    };

    customer_resource::Entity::insert(edge)
        .exec_without_returning(conn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                CloudResourceError::AlreadyAssigned(name.to_string())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                CloudResourceError::CustomerNotFound(customer_id)
            }
            _ => internal(e),
        })?;

    Ok(resource.into())
}

#[async_trait]
impl CloudResourceRepository for PgCloudResourceRepository {
    async fn get_all(&self) -> CloudResourceResult<Vec<CloudResource>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i64) -> CloudResourceResult<Option<CloudResource>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn get_by_name(&self, name: &str) -> CloudResourceResult<Option<CloudResource>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn update(
        &self,
        id: i64,
        input: UpdateCloudResource,
    ) -> CloudResourceResult<CloudResource> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(CloudResourceError::NotFound(id))?;

        let mut active: entity::ActiveModel = model.into();
        active.name = Set(input.name.clone());
        active.resource_type = Set(input.resource_type);
        active.region = Set(input.region);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                CloudResourceError::DuplicateName(input.name)
            }
            _ => internal(e),
        })?;

        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> CloudResourceResult<()> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        if result.rows_affected == 0 {
            return Err(CloudResourceError::NotFound(id));
        }

        Ok(())
    }

    async fn add_resource_to_customer(
        &self,
        name: &str,
        customer_id: i64,
    ) -> CloudResourceResult<CloudResource> {
        assign(&self.db, name, customer_id).await
    }

    async fn add_resources_to_customer(
        &self,
        names: &[String],
        customer_id: i64,
    ) -> CloudResourceResult<Vec<CloudResource>> {
        let txn = self.db.begin().await.map_err(internal)?;

        let mut added = Vec::with_capacity(names.len());
        for name in names {
            match assign(&txn, name, customer_id).await {
                Ok(resource) => added.push(resource),
                Err(e) => {
                    txn.rollback().await.map_err(internal)?;
                    return Err(e);
                }
            }
        }

        txn.commit().await.map_err(internal)?;
        Ok(added)
    }

    async fn get_resources_by_customer(
        &self,
        customer_id: i64,
    ) -> CloudResourceResult<Vec<CloudResource>> {
        let models = entity::Entity::find()
            .from_raw_sql(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                SELECT r.id, r.name, r.type, r.region, r.created_at, r.updated_at
                FROM resources r
                JOIN customer_resource cr ON cr.resource_id = r.id
                WHERE cr.customer_id = $1
                ORDER BY cr.created_at, r.id
                "#,
                [customer_id.into()],
            ))
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn does_customer_have_resource(
        &self,
        customer_id: i64,
        name: &str,
    ) -> CloudResourceResult<bool> {
        let row = self
            .db
            .query_one_raw(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                SELECT EXISTS (
                    SELECT 1
                    FROM customer_resource cr
                    JOIN resources r ON r.id = cr.resource_id
                    WHERE cr.customer_id = $1 AND r.name = $2
                ) AS present
                "#,
                [customer_id.into(), name.into()],
            ))
            .await
            .map_err(internal)?;

        match row {
            Some(row) => row.try_get("", "present").map_err(internal),
            None => Ok(false),
        }
    }
}
