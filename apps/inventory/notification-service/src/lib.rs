//! Notification Service
//!
//! Runs the consume loop over the `notifications` stream and exposes the
//! stored notifications under `/api/v1`. Schema migrations are applied by the
//! inventory API.

mod config;
pub mod routes;

use axum_helpers::{HealthCheck, health_router, serve, shutdown_channel, wait_for_shutdown};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::{postgres, redis};
use domain_notifications::{PgNotificationRepository, RedisNotifier};
use eyre::WrapErr;
use futures::FutureExt;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info};

pub use config::Config;

const SERVICE_NAME: &str = "notification-service";

pub async fn run() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let (db, redis) = tokio::try_join!(
        async {
            postgres::connect_from_config_with_retry(config.database.clone(), None)
                .await
                .wrap_err("PostgreSQL connection failed")
        },
        async {
            redis::connect_with_retry(&config.redis.url, None)
                .await
                .wrap_err("Redis connection failed")
        },
    )?;

    let notifier = RedisNotifier::new(redis.clone());
    if let Err(e) = notifier.connect().await {
        notifier.close();
        return Err(e).wrap_err("Failed to declare the notification queue");
    }

    let repository = Arc::new(PgNotificationRepository::new(db.clone()));
    let (shutdown_tx, shutdown_rx) = shutdown_channel();

    // A listener that dies takes the HTTP side down with it
    let listener = tokio::spawn({
        let notifier = notifier.clone();
        let repository = repository.clone();
        async move {
            let result = notifier.listen(repository).await;
            if let Err(e) = &result {
                error!(error = %e, "Notification listener stopped");
                let _ = shutdown_tx.send(true);
            }
            result
        }
    });

    let app = routes::api_router(repository)
        .merge(routes::docs_router())
        .merge(health_router(SERVICE_NAME, health_checks(&db, &redis)));

    info!(address = %config.server.address(), "Starting notification service");
    let served = serve(app, &config.server, wait_for_shutdown(shutdown_rx)).await;

    notifier.close();
    match listener.await {
        Ok(Ok(())) => info!("Notification listener drained"),
        Ok(Err(_)) => {}
        Err(e) => error!(error = %e, "Notification listener panicked"),
    }
    if let Err(e) = db.close().await {
        error!(error = %e, "Error closing PostgreSQL pool");
    }

    served.wrap_err("Server error")?;
    info!("Notification service shutdown complete");
    Ok(())
}

fn health_checks(
    db: &DatabaseConnection,
    conn: &redis::ConnectionManager,
) -> Vec<(&'static str, HealthCheck)> {
    let db = db.clone();
    let postgres_check: HealthCheck = Arc::new(move || {
        let db = db.clone();
        async move { postgres::check_health(&db).await.map_err(|e| e.to_string()) }.boxed()
    });

    let conn = conn.clone();
    let redis_check: HealthCheck = Arc::new(move || {
        let mut conn = conn.clone();
        async move { redis::check_health(&mut conn).await.map_err(|e| e.to_string()) }.boxed()
    });

    vec![("postgres", postgres_check), ("redis", redis_check)]
}
