use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::common::{DatabaseError, DatabaseResult};

/// `SELECT 1` over the pool
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.query_one_raw(Statement::from_string(
        DatabaseBackend::Postgres,
        "SELECT 1",
    ))
    .await
    .map(|_| ())
    .map_err(|e| DatabaseError::unhealthy("postgres", e))
}
