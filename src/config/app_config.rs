use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::goodbye::{
    DEFAULT_CACHE_KEY, DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_GOODBYE_PHRASES,
};
use crate::infrastructure::embedding::{
    DEFAULT_AZURE_API_VERSION, DEFAULT_EMBEDDING_MODEL, DEFAULT_OPENAI_BASE_URL,
};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub embedding: EmbeddingConfig,
    pub cache: CacheConfig,
    pub goodbye: GoodbyeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Embedding provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider credential; required
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Azure OpenAI deployment name; selects Azure when set
    pub engine: Option<String>,
    pub azure_endpoint: Option<String>,
    pub api_version: String,
    pub dimensions: usize,
    pub timeout_secs: u64,
}

/// Where reference embeddings are persisted
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackendKind {
    /// Binary file under `path`
    #[default]
    File,
    /// Process-local store
    InMemory,
    /// Shared Redis store
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackendKind,
    /// Directory holding the embeddings file (file backend)
    pub path: PathBuf,
    pub key: String,
    pub redis_url: String,
    pub key_prefix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoodbyeConfig {
    pub phrases: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            engine: None,
            azure_endpoint: None,
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            timeout_secs: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackendKind::default(),
            path: PathBuf::from("goodbye_embeddings"),
            key: DEFAULT_CACHE_KEY.to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: None,
        }
    }
}

impl Default for GoodbyeConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_GOODBYE_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("GOODBYE")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("goodbye.phrases"),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_env_fallbacks(|name| std::env::var(name).ok());

        Ok(app_config)
    }

    /// Fills unset provider settings from the conventional OpenAI variables
    fn apply_env_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.embedding.api_key.is_none() {
            self.embedding.api_key = lookup("OPENAI_API_KEY");
        }

        if self.embedding.engine.is_none() {
            self.embedding.engine = lookup("AZURE_OPENAI_TEXT_EMBEDDING_ENGINE");
        }

        if self.embedding.azure_endpoint.is_none() {
            self.embedding.azure_endpoint = lookup("AZURE_OPENAI_ENDPOINT");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.cache.backend, CacheBackendKind::File);
        assert_eq!(config.cache.key, "default");
        assert_eq!(config.embedding.model, "text-embedding-ada-002");
        assert_eq!(config.embedding.dimensions, 1536);
        assert_eq!(config.goodbye.phrases.len(), 8);
        assert!(config.embedding.api_key.is_none());
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let json = serde_json::json!({
            "cache": { "backend": "redis", "key_prefix": "agent" },
            "goodbye": { "phrases": ["bye", "see you"] },
            "logging": { "format": "json" }
        });

        let config: AppConfig = serde_json::from_value(json).unwrap();

        assert_eq!(config.cache.backend, CacheBackendKind::Redis);
        assert_eq!(config.cache.key_prefix.as_deref(), Some("agent"));
        assert_eq!(config.cache.key, "default");
        assert_eq!(config.goodbye.phrases, vec!["bye", "see you"]);
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_fallbacks_fill_unset_values() {
        let env: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "sk-env"),
            ("AZURE_OPENAI_TEXT_EMBEDDING_ENGINE", "engine-env"),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::default();

        config.apply_env_fallbacks(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.embedding.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.embedding.engine.as_deref(), Some("engine-env"));
        assert!(config.embedding.azure_endpoint.is_none());
    }

    #[test]
    fn test_env_fallbacks_do_not_override() {
        let mut config = AppConfig::default();
        config.embedding.api_key = Some("sk-configured".into());

        config.apply_env_fallbacks(|_| Some("sk-env".to_string()));

        assert_eq!(config.embedding.api_key.as_deref(), Some("sk-configured"));
    }
}
