use core_config::{Environment, FromEnv, server::ServerConfig};
use database::postgres::PostgresConfig;
use database::redis::RedisConfig;
use eyre::WrapErr;

/// Everything the API reads from the environment
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub database: PostgresConfig,
    pub redis: RedisConfig,
    pub server: ServerConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            environment: Environment::from_env(),
            database: PostgresConfig::from_env().wrap_err("Invalid PostgreSQL configuration")?,
            redis: RedisConfig::from_env().wrap_err("Invalid Redis configuration")?,
            server: ServerConfig::from_env().wrap_err("Invalid server configuration")?,
        })
    }
}
