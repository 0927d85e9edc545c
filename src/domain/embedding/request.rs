//! Embedding request types

/// Request to embed a single piece of text
///
/// `model` carries the OpenAI model name, or the deployment (engine) name
/// when the provider is Azure OpenAI.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRequest {
    model: String,
    input: String,
}

impl EmbeddingRequest {
    /// Create a request for a single text
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
        }
    }

    /// Get the model or engine name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the text to embed
    pub fn input(&self) -> &str {
        &self.input
    }
}
