//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for remote embedding services (OpenAI, Azure OpenAI)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate the embedding for the given input
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
