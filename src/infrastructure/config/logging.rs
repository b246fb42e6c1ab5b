//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Logs go to
    /// stderr so command output on stdout stays machine-readable.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !matches!(self.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.format),
            }
            .into());
        }
        if EnvFilter::try_new(&self.level).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: format!("'{}' is not a valid filter directive", self.level),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}
