//! Embedding provider implementations

mod adapter;
mod azure_openai;
mod factory;
mod http_client;
mod openai;

pub use adapter::TextEmbedder;
pub use azure_openai::{AzureOpenAiConfig, AzureOpenAiEmbeddingProvider, DEFAULT_AZURE_API_VERSION};
pub use factory::EmbeddingProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::{OpenAiEmbeddingProvider, DEFAULT_EMBEDDING_MODEL, DEFAULT_OPENAI_BASE_URL};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
