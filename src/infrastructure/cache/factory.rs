//! Cache factory for runtime selection

use std::sync::Arc;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

use super::in_memory::InMemoryCache;
use super::redis::{RedisCache, RedisCacheConfig};

/// Factory for creating keyed store instances
#[derive(Debug, Default)]
pub struct CacheFactory;

impl CacheFactory {
    /// Creates a process-local cache
    pub fn create_in_memory() -> Arc<dyn Cache> {
        Arc::new(InMemoryCache::new())
    }

    /// Connects to Redis
    pub async fn create_redis(
        url: &str,
        key_prefix: Option<&str>,
    ) -> Result<Arc<dyn Cache>, DomainError> {
        if url.trim().is_empty() {
            return Err(DomainError::configuration(
                "Redis URL is required for the redis cache backend",
            ));
        }

        let mut config = RedisCacheConfig::new(url);

        if let Some(prefix) = key_prefix {
            config = config.with_key_prefix(prefix);
        }

        Ok(Arc::new(RedisCache::connect(config).await?))
    }
}
