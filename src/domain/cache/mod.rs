//! Cache domain - key-value store abstraction backing shared reference embeddings

mod repository;

pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
