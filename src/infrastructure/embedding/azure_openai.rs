//! Azure OpenAI embedding provider, addressed by deployment (engine) name

use async_trait::async_trait;

use super::openai::parse_embedding_response;
use super::HttpClientTrait;
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";

/// Azure OpenAI API configuration
#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
}

impl AzureOpenAiConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }
}

/// Azure OpenAI embedding provider.
///
/// The request's model is the deployment name, not an OpenAI model id.
#[derive(Debug)]
pub struct AzureOpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    config: AzureOpenAiConfig,
}

impl<C: HttpClientTrait> AzureOpenAiEmbeddingProvider<C> {
    pub fn new(client: C, config: AzureOpenAiConfig) -> Self {
        Self { client, config }
    }

    fn build_url(&self, deployment: &str) -> String {
        format!(
            "{}/openai/deployments/{}/embeddings?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            deployment,
            self.config.api_version
        )
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("api-key", self.config.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for AzureOpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let url = self.build_url(request.model());
        let body = serde_json::json!({ "input": request.input() });

        let response = self.client.post_json(&url, self.headers(), &body).await?;

        parse_embedding_response(self.provider_name(), request.model(), response)
    }

    fn provider_name(&self) -> &'static str {
        "azure_openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::embedding::MockHttpClient;

    const TEST_URL: &str =
        "https://example.openai.azure.com/openai/deployments/goodbye-embeddings/embeddings?api-version=2024-02-01";

    #[tokio::test]
    async fn test_embed_uses_deployment_url() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            serde_json::json!({ "data": [{ "index": 0, "embedding": [0.6, 0.8] }] }),
        );
        let provider = AzureOpenAiEmbeddingProvider::new(
            client,
            AzureOpenAiConfig::new("https://example.openai.azure.com/", "azure-key"),
        );

        let response = provider
            .embed(EmbeddingRequest::new("goodbye-embeddings", "talk soon"))
            .await
            .unwrap();

        assert_eq!(response.model(), "goodbye-embeddings");
        assert_eq!(response.embeddings()[0].vector(), &[0.6, 0.8]);

        let requests = provider.client.requests();
        assert_eq!(requests[0].body["input"], "talk soon");
        assert!(requests[0].body.get("model").is_none());
        assert!(requests[0]
            .headers
            .contains(&("api-key".to_string(), "azure-key".to_string())));
    }

    #[tokio::test]
    async fn test_api_version_override() {
        let url = "https://example.openai.azure.com/openai/deployments/d/embeddings?api-version=2023-05-15";
        let client = MockHttpClient::new()
            .with_response(url, serde_json::json!({ "data": [{ "embedding": [1.0] }] }));
        let provider = AzureOpenAiEmbeddingProvider::new(
            client,
            AzureOpenAiConfig::new("https://example.openai.azure.com", "k")
                .with_api_version("2023-05-15"),
        );

        assert!(provider.embed(EmbeddingRequest::new("d", "x")).await.is_ok());
    }

    #[tokio::test]
    async fn test_embed_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "HTTP 401: unauthorized");
        let provider = AzureOpenAiEmbeddingProvider::new(
            client,
            AzureOpenAiConfig::new("https://example.openai.azure.com", "bad"),
        );

        let result = provider
            .embed(EmbeddingRequest::new("goodbye-embeddings", "x"))
            .await;

        assert!(result.is_err());
    }
}
