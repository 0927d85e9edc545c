//! Text-to-vector adapter over an [`EmbeddingProvider`]

use std::fmt;
use std::sync::Arc;

use metrics::counter;
use tracing::debug;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::goodbye::DEFAULT_EMBEDDING_DIMENSIONS;
use crate::domain::DomainError;

/// Embeds single texts with a fixed model (or engine) and dimension.
///
/// One call to [`TextEmbedder::embed`] is exactly one provider request.
/// Failures are returned as-is; there is no retry.
#[derive(Clone)]
pub struct TextEmbedder {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    dimensions: usize,
}

impl fmt::Debug for TextEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEmbedder")
            .field("provider", &self.provider.provider_name())
            .field("model", &self.model)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

impl TextEmbedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }

    /// Sets the vector length every response must have
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let provider = self.provider.provider_name();
        counter!("goodbye_embedding_requests_total", "provider" => provider).increment(1);

        let response = self
            .provider
            .embed(EmbeddingRequest::new(&self.model, text))
            .await?;

        if let Some(usage) = response.usage() {
            debug!(
                provider,
                model = response.model(),
                total_tokens = usage.total_tokens(),
                "Embedding computed"
            );
        }

        let vector = response
            .into_first()
            .ok_or_else(|| DomainError::provider(provider, "No embeddings in response"))?
            .into_vector();

        if vector.len() != self.dimensions {
            return Err(DomainError::provider(
                provider,
                format!(
                    "Expected embedding of {} dimensions, got {}",
                    self.dimensions,
                    vector.len()
                ),
            ));
        }

        Ok(vector)
    }
}
