use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Goodbye classifier not initialized: call initialize() before classify()")]
    NotInitialized,

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Returns true for failures of the remote embedding call
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let error = DomainError::configuration("API key is required");
        assert_eq!(error.to_string(), "Configuration error: API key is required");
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("openai", "HTTP 429: rate limited");
        assert_eq!(
            error.to_string(),
            "Provider error: openai - HTTP 429: rate limited"
        );
        assert!(error.is_provider());
    }

    #[test]
    fn test_not_initialized_error() {
        let error = DomainError::NotInitialized;
        assert!(error.to_string().contains("not initialized"));
        assert!(!error.is_provider());
    }
}
