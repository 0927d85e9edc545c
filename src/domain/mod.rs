//! Domain layer - goodbye detection model, embedding and cache abstractions

pub mod cache;
pub mod embedding;
pub mod error;
pub mod goodbye;

pub use cache::{Cache, CacheExt};
pub use embedding::{
    dot_product, Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
    EmbeddingUsage,
};
pub use error::DomainError;
pub use goodbye::{
    Detection, ReferenceEmbeddingMatrix, ReferenceEmbeddingStore, ReferencePhraseSet,
    DEFAULT_CACHE_KEY, DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_GOODBYE_PHRASES, FAST_PATH_KEYWORD,
    SIMILARITY_THRESHOLD,
};
