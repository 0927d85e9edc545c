//! Resolution of the reference matrix through the configured cache backend

use std::fmt;
use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info, warn};

use super::file_store::ReferenceEmbeddingFile;
use crate::domain::goodbye::{
    ReferenceEmbeddingMatrix, ReferenceEmbeddingStore, ReferencePhraseSet,
};
use crate::domain::DomainError;
use crate::infrastructure::embedding::TextEmbedder;

/// Loads reference embeddings from a keyed store or a file, building and
/// persisting them on a miss.
///
/// The store is used when one is configured and the cache key is
/// non-empty; otherwise the file is used. Concurrent first-time callers
/// may each build and write; the last write wins.
#[derive(Clone)]
pub struct ReferenceEmbeddingCache {
    embedder: TextEmbedder,
    file: ReferenceEmbeddingFile,
    store: Option<Arc<dyn ReferenceEmbeddingStore>>,
}

impl fmt::Debug for ReferenceEmbeddingCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceEmbeddingCache")
            .field("embedder", &self.embedder)
            .field("file", &self.file)
            .field("store", &self.store.as_ref().map(|s| s.backend_name()))
            .finish()
    }
}

impl ReferenceEmbeddingCache {
    pub fn new(embedder: TextEmbedder, file: ReferenceEmbeddingFile) -> Self {
        Self {
            embedder,
            file,
            store: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn ReferenceEmbeddingStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn embedder(&self) -> &TextEmbedder {
        &self.embedder
    }

    pub fn file(&self) -> &ReferenceEmbeddingFile {
        &self.file
    }

    pub async fn resolve(
        &self,
        phrases: &ReferencePhraseSet,
        cache_key: &str,
    ) -> Result<ReferenceEmbeddingMatrix, DomainError> {
        match &self.store {
            Some(store) if !cache_key.is_empty() => {
                self.resolve_from_store(store.as_ref(), phrases, cache_key)
                    .await
            }
            _ => self.resolve_from_file(phrases).await,
        }
    }

    async fn resolve_from_store(
        &self,
        store: &dyn ReferenceEmbeddingStore,
        phrases: &ReferencePhraseSet,
        cache_key: &str,
    ) -> Result<ReferenceEmbeddingMatrix, DomainError> {
        let backend = store.backend_name();

        if let Some(matrix) = store.get(cache_key).await? {
            if self.is_current(&matrix, phrases) {
                debug!(backend, cache_key, "Reference embeddings loaded from store");
                return Ok(matrix);
            }

            warn!(
                backend,
                cache_key, "Stored reference embeddings do not match the phrase set, rebuilding"
            );
        }

        let matrix = self.build(phrases, backend).await?;
        store.put(cache_key, &matrix).await?;
        info!(backend, cache_key, "Reference embeddings stored");

        Ok(matrix)
    }

    async fn resolve_from_file(
        &self,
        phrases: &ReferencePhraseSet,
    ) -> Result<ReferenceEmbeddingMatrix, DomainError> {
        let path = self.file.path().display();

        if self.file.exists().await? {
            let matrix = self.file.read().await?;

            if self.is_current(&matrix, phrases) {
                debug!(%path, "Reference embeddings loaded from file");
                return Ok(matrix);
            }

            warn!(%path, "Reference embeddings file does not match the phrase set, rebuilding");
        }

        let matrix = self.build(phrases, "file").await?;
        self.file.write(&matrix).await?;
        info!(%path, "Reference embeddings written");

        Ok(matrix)
    }

    fn is_current(&self, matrix: &ReferenceEmbeddingMatrix, phrases: &ReferencePhraseSet) -> bool {
        matrix.matches(phrases) && matrix.dimensions() == self.embedder.dimensions()
    }

    /// Embeds each phrase in order, one request at a time. The first
    /// failure aborts the build.
    async fn build(
        &self,
        phrases: &ReferencePhraseSet,
        backend: &'static str,
    ) -> Result<ReferenceEmbeddingMatrix, DomainError> {
        info!(
            phrases = phrases.len(),
            provider = self.embedder.provider_name(),
            model = self.embedder.model(),
            "Building reference embeddings"
        );
        counter!("goodbye_reference_builds_total", "backend" => backend).increment(1);

        let mut columns = Vec::with_capacity(phrases.len());
        for phrase in phrases.iter() {
            columns.push(self.embedder.embed(phrase).await?);
        }

        ReferenceEmbeddingMatrix::from_columns(phrases, columns)
    }
}
