//! Reference store backed by a key-value [`Cache`]

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cache::{Cache, CacheExt};
use crate::domain::goodbye::{ReferenceEmbeddingMatrix, ReferenceEmbeddingStore};
use crate::domain::DomainError;

const KEY_NAMESPACE: &str = "goodbye_embeddings";

/// Stores reference matrices as JSON under `goodbye_embeddings:<key>`,
/// without expiry.
#[derive(Clone)]
pub struct CacheReferenceStore {
    cache: Arc<dyn Cache>,
}

impl fmt::Debug for CacheReferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheReferenceStore")
            .field("backend", &self.cache.backend_name())
            .finish()
    }
}

impl CacheReferenceStore {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    fn namespaced(key: &str) -> String {
        format!("{}:{}", KEY_NAMESPACE, key)
    }
}

#[async_trait]
impl ReferenceEmbeddingStore for CacheReferenceStore {
    async fn get(&self, key: &str) -> Result<Option<ReferenceEmbeddingMatrix>, DomainError> {
        let matrix: Option<ReferenceEmbeddingMatrix> =
            self.cache.get(&Self::namespaced(key)).await?;

        match matrix {
            Some(matrix) => {
                matrix.validate()?;
                Ok(Some(matrix))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, matrix: &ReferenceEmbeddingMatrix) -> Result<(), DomainError> {
        self.cache.put(&Self::namespaced(key), matrix).await
    }

    fn backend_name(&self) -> &'static str {
        self.cache.backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::goodbye::ReferencePhraseSet;
    use crate::infrastructure::cache::InMemoryCache;

    fn matrix() -> ReferenceEmbeddingMatrix {
        let phrases = ReferencePhraseSet::new(["bye", "see you"]).unwrap();
        ReferenceEmbeddingMatrix::from_columns(&phrases, vec![vec![1.0, 0.0], vec![0.0, 1.0]])
            .unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let store = CacheReferenceStore::new(Arc::new(InMemoryCache::new()));

        store.put("default", &matrix()).await.unwrap();

        assert_eq!(store.get("default").await.unwrap(), Some(matrix()));
        assert_eq!(store.backend_name(), "in_memory");
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = CacheReferenceStore::new(Arc::new(InMemoryCache::new()));

        assert!(store.get("default").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_keys_are_namespaced() {
        let cache = Arc::new(MockCache::new());
        let store = CacheReferenceStore::new(cache.clone());

        store.put("agent-a", &matrix()).await.unwrap();

        assert_eq!(cache.keys(), vec!["goodbye_embeddings:agent-a".to_string()]);
    }

    #[tokio::test]
    async fn test_inconsistent_entry_is_rejected() {
        let json = r#"{"dimensions":2,"phrases":["bye"],"fingerprint":"x","columns":[[1.0,0.0],[0.0,1.0]]}"#;
        let cache = Arc::new(MockCache::new().with_raw_entry("goodbye_embeddings:default", json));
        let store = CacheReferenceStore::new(cache);

        assert!(store.get("default").await.is_err());
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let store = CacheReferenceStore::new(Arc::new(MockCache::new().with_error("down")));

        assert!(matches!(
            store.get("default").await,
            Err(DomainError::Cache { .. })
        ));
    }
}
