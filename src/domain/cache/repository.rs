//! Key-value store trait

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Shared key-value store holding JSON documents. Entries never expire;
/// a `put` overwrites whatever was stored under the key.
///
/// Values cross the trait as raw strings so it stays dyn-compatible.
/// Use [`CacheExt`] for typed access.
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn put_raw(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Short backend name used in logs and metrics
    fn backend_name(&self) -> &'static str;
}

/// Typed JSON access on top of [`Cache`]
pub trait CacheExt: Cache {
    fn get<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send + 'a
    where
        V: DeserializeOwned + Send + 'a,
    {
        async move {
            let Some(data) = self.get_raw(key).await? else {
                return Ok(None);
            };

            serde_json::from_str(&data).map(Some).map_err(|e| {
                DomainError::cache(format!("Failed to deserialize value at '{}': {}", key, e))
            })
        }
    }

    fn put<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send + 'a
    where
        V: Serialize + Sync + 'a,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::cache(format!("Failed to serialize value for '{}': {}", key, e))
            })?;
            self.put_raw(key, &data).await
        }
    }
}

impl<T: Cache + ?Sized> CacheExt for T {}
