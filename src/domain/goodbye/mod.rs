//! Goodbye detection domain - reference phrases, embedding matrix and verdicts

mod detection;
mod matrix;
mod phrases;
mod store;

pub use detection::Detection;
pub use matrix::ReferenceEmbeddingMatrix;
pub use phrases::{ReferencePhraseSet, DEFAULT_GOODBYE_PHRASES};
pub use store::ReferenceEmbeddingStore;

#[cfg(test)]
pub use store::MockReferenceEmbeddingStore;

/// Similarity a reference phrase must strictly exceed to count as a goodbye
pub const SIMILARITY_THRESHOLD: f32 = 0.9;

/// Substring that short-circuits classification without an embedding call
pub const FAST_PATH_KEYWORD: &str = "bye";

/// Cache key used when none is configured
pub const DEFAULT_CACHE_KEY: &str = "default";

/// Embedding dimension of `text-embedding-ada-002`
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
