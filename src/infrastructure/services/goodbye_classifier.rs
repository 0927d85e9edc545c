//! Goodbye classification service

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info};

use crate::config::{AppConfig, CacheBackendKind};
use crate::domain::goodbye::{
    Detection, ReferenceEmbeddingMatrix, ReferenceEmbeddingStore, ReferencePhraseSet,
    DEFAULT_CACHE_KEY, FAST_PATH_KEYWORD, SIMILARITY_THRESHOLD,
};
use crate::domain::DomainError;
use crate::infrastructure::cache::CacheFactory;
use crate::infrastructure::embedding::EmbeddingProviderFactory;
use crate::infrastructure::goodbye::{
    CacheReferenceStore, ReferenceEmbeddingCache, ReferenceEmbeddingFile,
};

/// Decides whether an utterance is a goodbye.
///
/// Must be initialized once with [`GoodbyeClassifier::initialize`] before
/// classifying. After that, `classify` only needs `&self` and can be
/// shared across tasks.
#[derive(Debug)]
pub struct GoodbyeClassifier {
    cache: ReferenceEmbeddingCache,
    phrases: ReferencePhraseSet,
    cache_key: String,
    matrix: Option<ReferenceEmbeddingMatrix>,
}

impl GoodbyeClassifier {
    /// Creates a classifier over the default phrases and cache key
    pub fn new(cache: ReferenceEmbeddingCache) -> Self {
        Self {
            cache,
            phrases: ReferencePhraseSet::default(),
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            matrix: None,
        }
    }

    pub fn with_phrases(mut self, phrases: ReferencePhraseSet) -> Self {
        self.phrases = phrases;
        self
    }

    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    /// Wires provider, cache backend and phrases from configuration.
    ///
    /// Fails fast on a missing credential or an unreachable Redis.
    pub async fn from_config(config: &AppConfig) -> Result<Self, DomainError> {
        let embedder = EmbeddingProviderFactory::create(&config.embedding)?;
        let phrases = ReferencePhraseSet::new(config.goodbye.phrases.iter().cloned())?;
        let file = ReferenceEmbeddingFile::in_directory(&config.cache.path);

        let store: Option<Arc<dyn ReferenceEmbeddingStore>> = match config.cache.backend {
            CacheBackendKind::File => None,
            CacheBackendKind::InMemory => Some(Arc::new(CacheReferenceStore::new(
                CacheFactory::create_in_memory(),
            ))),
            CacheBackendKind::Redis => {
                let cache = CacheFactory::create_redis(
                    &config.cache.redis_url,
                    config.cache.key_prefix.as_deref(),
                )
                .await?;
                Some(Arc::new(CacheReferenceStore::new(cache)))
            }
        };

        let mut cache = ReferenceEmbeddingCache::new(embedder, file);
        if let Some(store) = store {
            cache = cache.with_store(store);
        }

        Ok(Self::new(cache)
            .with_phrases(phrases)
            .with_cache_key(config.cache.key.clone()))
    }

    pub fn phrases(&self) -> &ReferencePhraseSet {
        &self.phrases
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    pub fn is_initialized(&self) -> bool {
        self.matrix.is_some()
    }

    pub fn matrix(&self) -> Option<&ReferenceEmbeddingMatrix> {
        self.matrix.as_ref()
    }

    /// Loads (or builds) the reference matrix. Every call resolves again.
    pub async fn initialize(&mut self) -> Result<(), DomainError> {
        let matrix = self.cache.resolve(&self.phrases, &self.cache_key).await?;

        info!(
            phrases = matrix.len(),
            dimensions = matrix.dimensions(),
            "Goodbye classifier initialized"
        );
        self.matrix = Some(matrix);

        Ok(())
    }

    pub async fn classify(&self, text: &str) -> Result<bool, DomainError> {
        Ok(self.score(text).await?.is_goodbye())
    }

    /// Classifies `text`, reporting which path decided and, for the
    /// embedding path, the closest reference phrase.
    pub async fn score(&self, text: &str) -> Result<Detection, DomainError> {
        let matrix = self.matrix.as_ref().ok_or(DomainError::NotInitialized)?;

        let detection = if text.to_lowercase().contains(FAST_PATH_KEYWORD) {
            Detection::Keyword
        } else {
            let normalized = text.trim().to_lowercase();
            let embedding = self.cache.embedder().embed(&normalized).await?;

            let (index, similarity) = matrix
                .best_match(&embedding)
                .ok_or_else(|| DomainError::storage("Reference matrix has no columns"))?;

            Detection::Semantic {
                phrase: matrix.phrases()[index].clone(),
                similarity,
                is_goodbye: similarity > SIMILARITY_THRESHOLD,
            }
        };

        let result = if detection.is_goodbye() { "true" } else { "false" };
        counter!(
            "goodbye_classifications_total",
            "path" => detection.path(),
            "result" => result
        )
        .increment(1);
        debug!(path = detection.path(), result, ?detection, "Text classified");

        Ok(detection)
    }
}
