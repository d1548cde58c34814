/// Failures surfaced by the connection helpers
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Postgres(#[from] sea_orm::DbErr),

    #[cfg(feature = "redis")]
    #[error(transparent)]
    Redis(#[from] redis::RedisError),

    /// A liveness probe failed or answered unexpectedly
    #[error("{dependency} is unhealthy: {reason}")]
    Unhealthy {
        dependency: &'static str,
        reason: String,
    },
}

impl DatabaseError {
    pub(crate) fn unhealthy(dependency: &'static str, reason: impl ToString) -> Self {
        DatabaseError::Unhealthy {
            dependency,
            reason: reason.to_string(),
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unhealthy_message_names_dependency() {
        let err = DatabaseError::unhealthy("redis", "connection refused");
        assert_eq!(err.to_string(), "redis is unhealthy: connection refused");
    }
}
