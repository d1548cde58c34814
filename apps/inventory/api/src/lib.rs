//! Inventory API
//!
//! Serves customers and the resource catalog under `/api/v1` and publishes an
//! event to the `notifications` stream for every resource assignment.
//!
//! Startup order: configuration, tracing, PostgreSQL and Redis (with retry),
//! migrations, queue declaration, then the HTTP server. The notifier is closed
//! on every exit path after it was created.

mod config;
mod openapi;
pub mod routes;

use axum_helpers::{HealthCheck, health_router, serve, shutdown_channel, wait_for_shutdown};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::{postgres, redis};
use domain_cloud_resources::PgCloudResourceRepository;
use domain_customers::PgCustomerRepository;
use domain_notifications::{NotificationPublisher, RedisNotifier};
use eyre::WrapErr;
use futures::FutureExt;
use migration::Migrator;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info};

pub use config::Config;

const SERVICE_NAME: &str = "inventory-api";

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

    postgres::run_migrations::<Migrator>(&db, SERVICE_NAME)
        .await
        .wrap_err("Failed to apply migrations")?;

    let notifier = RedisNotifier::new(redis.clone());
    if let Err(e) = notifier.connect().await {
        notifier.close();
        return Err(e).wrap_err("Failed to declare the notification queue");
    }

    let publisher: Arc<dyn NotificationPublisher> = Arc::new(notifier.clone());
    let app = routes::api_router(
        PgCustomerRepository::new(db.clone()),
        PgCloudResourceRepository::new(db.clone()),
        Some(publisher),
    )
    .merge(routes::docs_router())
    .merge(health_router(SERVICE_NAME, health_checks(&db, &redis)));

    let (_shutdown_tx, shutdown_rx) = shutdown_channel();
    info!(address = %config.server.address(), "Starting inventory API");
    let served = serve(app, &config.server, wait_for_shutdown(shutdown_rx)).await;

    notifier.close();
    if let Err(e) = db.close().await {
        error!(error = %e, "Error closing PostgreSQL pool");
    }

    served.wrap_err("Server error")?;
    info!("Inventory API shutdown complete");
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
