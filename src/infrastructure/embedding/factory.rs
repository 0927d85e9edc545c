//! Embedding provider factory driven by configuration

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::{
    AzureOpenAiConfig, AzureOpenAiEmbeddingProvider, HttpClient, OpenAiEmbeddingProvider,
    TextEmbedder,
};
use crate::config::EmbeddingConfig;
use crate::domain::DomainError;

/// Factory for building the configured embedding adapter
#[derive(Debug, Default)]
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    /// Builds a [`TextEmbedder`] for the configured provider.
    ///
    /// A configured engine selects Azure OpenAI (the engine is the
    /// deployment name); otherwise OpenAI is used with `model`.
    pub fn create(config: &EmbeddingConfig) -> Result<TextEmbedder, DomainError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                DomainError::configuration(
                    "Embedding API key must be set (GOODBYE__EMBEDDING__API_KEY or OPENAI_API_KEY)",
                )
            })?;

        if config.dimensions == 0 {
            return Err(DomainError::configuration(
                "Embedding dimensions must be greater than zero",
            ));
        }

        let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;

        let embedder = match config.engine.as_deref().filter(|e| !e.is_empty()) {
            Some(engine) => {
                let endpoint = config.azure_endpoint.as_deref().ok_or_else(|| {
                    DomainError::configuration(
                        "An Azure endpoint is required when an embedding engine is configured",
                    )
                })?;

                info!(engine, endpoint, "Using Azure OpenAI embedding engine");

                let azure_config = AzureOpenAiConfig::new(endpoint, api_key)
                    .with_api_version(&config.api_version);
                let provider = AzureOpenAiEmbeddingProvider::new(client, azure_config);
                TextEmbedder::new(Arc::new(provider), engine)
            }
            None => {
                info!(model = %config.model, base_url = %config.base_url, "Using OpenAI embedding model");

                let provider =
                    OpenAiEmbeddingProvider::with_base_url(client, api_key, &config.base_url);
                TextEmbedder::new(Arc::new(provider), &config.model)
            }
        };

        Ok(embedder.with_dimensions(config.dimensions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: &str) -> EmbeddingConfig {
        EmbeddingConfig {
            api_key: Some(key.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let result = EmbeddingProviderFactory::create(&EmbeddingConfig::default());

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_blank_api_key_is_configuration_error() {
        let result = EmbeddingProviderFactory::create(&config_with_key("   "));

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_openai_by_default() {
        let embedder = EmbeddingProviderFactory::create(&config_with_key("sk-test")).unwrap();

        assert_eq!(embedder.provider_name(), "openai");
        assert_eq!(embedder.model(), "text-embedding-ada-002");
        assert_eq!(embedder.dimensions(), 1536);
    }

    #[test]
    fn test_engine_selects_azure() {
        let config = EmbeddingConfig {
            engine: Some("goodbye-embeddings".into()),
            azure_endpoint: Some("https://example.openai.azure.com".into()),
            ..config_with_key("azure-key")
        };

        let embedder = EmbeddingProviderFactory::create(&config).unwrap();

        assert_eq!(embedder.provider_name(), "azure_openai");
        assert_eq!(embedder.model(), "goodbye-embeddings");
    }

    #[test]
    fn test_engine_without_endpoint_is_configuration_error() {
        let config = EmbeddingConfig {
            engine: Some("goodbye-embeddings".into()),
            ..config_with_key("azure-key")
        };

        let result = EmbeddingProviderFactory::create(&config);

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = EmbeddingConfig {
            dimensions: 0,
            ..config_with_key("sk-test")
        };

        assert!(EmbeddingProviderFactory::create(&config).is_err());
    }
}
