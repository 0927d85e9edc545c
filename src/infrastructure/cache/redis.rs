//! Redis-backed store shared across processes

use std::fmt;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::cache::Cache;
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Connection URL, e.g. `redis://127.0.0.1:6379`
    pub url: String,
    /// Prepended to every key as `<prefix>:<key>`
    pub key_prefix: Option<String>,
}

impl RedisCacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key_prefix: None,
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    fn prefixed(&self, key: &str) -> String {
        match self.key_prefix.as_deref().filter(|p| !p.is_empty()) {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

/// Writes use plain `SET` without expiry
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
    config: RedisCacheConfig,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Opens a managed connection, failing if Redis is unreachable
    pub async fn connect(config: RedisCacheConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::cache(format!("Invalid Redis URL '{}': {}", config.url, e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.connection.clone();

        conn.get(self.config.prefixed(key))
            .await
            .map_err(|e| DomainError::cache(format!("Redis GET '{}' failed: {}", key, e)))
    }

    async fn put_raw(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        let result: redis::RedisResult<()> = conn.set(self.config.prefixed(key), value).await;

        result.map_err(|e| DomainError::cache(format!("Redis SET '{}' failed: {}", key, e)))
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_put_and_get() {
        let config = RedisCacheConfig::new("redis://127.0.0.1:6379").with_key_prefix("goodbye-test");
        let cache = RedisCache::connect(config).await.unwrap();

        cache.put("key1", &vec![1.0f32, 0.5]).await.unwrap();

        let result: Option<Vec<f32>> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some(vec![1.0, 0.5]));
    }

    #[test]
    fn test_key_prefix() {
        let config = RedisCacheConfig::new("redis://localhost").with_key_prefix("agent");

        assert_eq!(config.prefixed("default"), "agent:default");
        assert_eq!(RedisCacheConfig::new("redis://localhost").prefixed("default"), "default");
        assert_eq!(
            RedisCacheConfig::new("redis://localhost")
                .with_key_prefix("")
                .prefixed("default"),
            "default"
        );
    }
}
