use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::domain::DomainError;

/// Installs the global subscriber, writing to stderr; stdout carries
/// classification results.
///
/// `RUST_LOG` takes precedence over the configured level. Fails on an
/// unparsable level or when a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), DomainError> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), &config.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    installed.map_err(|e| DomainError::configuration(format!("Logging already initialized: {}", e)))
}

fn build_filter(env_directives: Option<&str>, level: &str) -> Result<EnvFilter, DomainError> {
    let directives = env_directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(level);

    EnvFilter::try_new(directives).map_err(|e| {
        DomainError::configuration(format!("Invalid log level '{}': {}", directives, e))
    })
}
