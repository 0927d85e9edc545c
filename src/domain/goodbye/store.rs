//! Keyed store for reference embedding matrices

use async_trait::async_trait;

use super::ReferenceEmbeddingMatrix;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Shared store of reference matrices keyed by an opaque cache key.
///
/// Writes are plain overwrites: no locking, no compare-and-swap.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReferenceEmbeddingStore: Send + Sync {
    /// Loads the matrix stored under `key`
    async fn get(&self, key: &str) -> Result<Option<ReferenceEmbeddingMatrix>, DomainError>;

    /// Stores `matrix` under `key`, replacing any previous entry
    async fn put(&self, key: &str, matrix: &ReferenceEmbeddingMatrix) -> Result<(), DomainError>;

    /// Short backend name used in logs and metrics
    fn backend_name(&self) -> &'static str;
}
