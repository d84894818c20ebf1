//! Observability (logging)
//!
//! The library only emits `tracing` events; binaries decide where they go.
//! Logs are written to stderr so generated output on stdout stays clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging stack
///
/// `RUST_LOG` takes precedence. Otherwise the level follows the `-v` count:
/// warn, info, debug, trace.
///
/// # Example
///
/// ```rust,no_run
/// use crudforge::observability::{self, ObservabilityConfig};
///
/// observability::init(&ObservabilityConfig::new(1));
/// tracing::info!("scaffolder started");
/// ```
pub fn init(config: &ObservabilityConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // a second call (tests, embedding) keeps the first subscriber
    if installed.is_err() {
        tracing::debug!("subscriber already installed, keeping it");
    }
}

/// Observability configuration
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Number of `-v` flags given
    pub verbosity: u8,

    /// Emit JSON lines instead of compact text
    pub json: bool,
}

impl ObservabilityConfig {
    /// Create new observability config
    #[must_use]
    pub const fn new(verbosity: u8) -> Self {
        Self {
            verbosity,
            json: false,
        }
    }

    /// Switch to JSON formatting
    #[must_use]
    pub const fn with_json(mut self) -> Self {
        self.json = true;
        self
    }

    fn default_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info,crudforge=info",
            2 => "info,crudforge=debug",
            _ => "debug,crudforge=trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.verbosity, 0);
        assert!(!config.json);
        assert_eq!(config.default_directive(), "warn");
    }

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new(2).with_json();
        assert!(config.json);
        assert_eq!(config.default_directive(), "info,crudforge=debug");
    }

    #[test]
    fn test_high_verbosity_saturates() {
        assert_eq!(
            ObservabilityConfig::new(9).default_directive(),
            "debug,crudforge=trace"
        );
    }
}
