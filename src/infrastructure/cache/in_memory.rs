//! Process-local store backed by moka

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

const DEFAULT_MAX_CAPACITY: u64 = 1_000;

/// Entries are shared by every holder of the same instance and lost when
/// the process exits.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
    entries: MokaCache<String, String>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_max_capacity(DEFAULT_MAX_CAPACITY)
    }

    pub fn with_max_capacity(capacity: u64) -> Self {
        Self {
            entries: MokaCache::builder().max_capacity(capacity).build(),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.get(key).await)
    }

    async fn put_raw(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "in_memory"
    }
}
