//! Logging setup for the depgrid binary
//!
//! Everything goes to stderr so stdout stays clean for tables and extracts.
//! RUST_LOG takes precedence over the configured default filter.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Emit one JSON object per event instead of human-readable lines
    pub json: bool,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Default log level filter
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            include_location: false,
            default_filter: "warn,depgrid=info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Debug output from every depgrid crate
    pub fn verbose() -> Self {
        Self {
            include_location: cfg!(debug_assertions),
            default_filter: "info,depgrid=debug,depgrid_table=debug,depgrid_interchange=debug"
                .to_string(),
            ..Self::default()
        }
    }
}

/// Install the global subscriber
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let layer = if config.json {
        fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_ansi(false)
            .json()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry().with(layer).try_init()?;

    tracing::debug!(
        json = config.json,
        filter = %config.default_filter,
        "Logging initialized"
    );
    Ok(())
}
