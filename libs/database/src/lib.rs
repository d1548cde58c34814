//! Connection plumbing shared by the inventory services.
//!
//! - `postgres`: SeaORM pool construction, migrations and a `SELECT 1` probe
//! - `redis`: `ConnectionManager` construction and a `PING` probe
//! - `common`: the error type and the backoff helper both connectors use
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "inventory-api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{DatabaseError, DatabaseResult};
