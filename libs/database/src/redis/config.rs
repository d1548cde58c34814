use core_config::{ConfigError, FromEnv, env_required};

/// Broker connection settings
#[derive(Clone, Debug)]
pub struct RedisConfig {
    pub url: String,
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl FromEnv for RedisConfig {
    /// `REDIS_URL`, e.g. `redis://127.0.0.1:6379`
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_required("REDIS_URL")?))
    }
}
