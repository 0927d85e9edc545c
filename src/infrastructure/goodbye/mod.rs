//! Reference embedding persistence and resolution

mod cache_store;
mod file_store;
mod resolver;

pub use cache_store::CacheReferenceStore;
pub use file_store::{decode_matrix, encode_matrix, ReferenceEmbeddingFile, EMBEDDINGS_FILE_NAME};
pub use resolver::ReferenceEmbeddingCache;
