//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheBackendKind, CacheConfig, EmbeddingConfig, GoodbyeConfig, LogFormat,
    LoggingConfig,
};
