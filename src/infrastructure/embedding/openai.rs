//! OpenAI embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;

use super::HttpClientTrait;
use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage,
};
use crate::domain::DomainError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Model used when no engine is configured
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// OpenAI embedding provider
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    /// Create a new OpenAI embedding provider
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    /// Create a new provider with custom base URL
    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(&self, request: &EmbeddingRequest) -> serde_json::Value {
        serde_json::json!({
            "model": request.model(),
            "input": request.input(),
        })
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let url = self.embeddings_url();
        let body = self.build_request(&request);

        let response = self.client.post_json(&url, self.headers(), &body).await?;

        parse_embedding_response(self.provider_name(), request.model(), response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Parses the `/embeddings` response body shared by OpenAI and Azure OpenAI
pub(super) fn parse_embedding_response(
    provider: &str,
    requested_model: &str,
    json: serde_json::Value,
) -> Result<EmbeddingResponse, DomainError> {
    let response: OpenAiEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
        DomainError::provider(provider, format!("Failed to parse embedding response: {}", e))
    })?;

    if response.data.is_empty() {
        return Err(DomainError::provider(provider, "No embeddings in response"));
    }

    let embeddings: Vec<Embedding> = response
        .data
        .into_iter()
        .map(|d| Embedding::new(d.index, d.embedding))
        .collect();

    let usage = response
        .usage
        .map(|u| EmbeddingUsage::new(u.prompt_tokens, u.total_tokens));

    Ok(EmbeddingResponse::new(
        response.model.unwrap_or_else(|| requested_model.to_string()),
        embeddings,
        usage,
    ))
}

// OpenAI API types for embeddings

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    model: Option<String>,
    data: Vec<OpenAiEmbeddingData>,
    usage: Option<OpenAiEmbeddingUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingUsage {
    prompt_tokens: u32,
    total_tokens: u32,
}
