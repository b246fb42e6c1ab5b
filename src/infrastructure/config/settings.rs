//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; the endpoint, timeout and
//! freshness window can be overridden from the environment (a `.env` file
//! is honoured by the binary).
//!
//! # Example
//!
//! ```no_run
//! use satwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("satwatch.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::display::DisplayConfig;
use super::logging::LoggingConfig;
use super::provider::ProviderConfig;
use crate::error::{ConfigError, Result};

/// Config file used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "satwatch.toml";

const ENV_API_URL: &str = "SATWATCH_API_URL";
const ENV_TIMEOUT_MS: &str = "SATWATCH_TIMEOUT_MS";
const ENV_FRESHNESS_SECS: &str = "SATWATCH_FRESHNESS_SECS";

/// Main application configuration.
///
/// Every section is optional; an empty file yields the open-notify defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Upstream endpoint, timeouts, freshness window and field mapping.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Map and marker dimensions for terminal rendering.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// an environment override is not a number, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// Used for the default config path so the binary works out of the box.
    /// Environment overrides still apply.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for an existing file.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML content and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, |key| std::env::var(key).ok())
    }

    /// Parse with an explicit variable lookup instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Same as [`Config::parse_toml`].
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    fn apply_overrides<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.provider.url = Some(url);
        }
        if let Some(raw) = env(ENV_TIMEOUT_MS) {
            self.provider.timeout_ms = parse_number(ENV_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = env(ENV_FRESHNESS_SECS) {
            self.provider.freshness_secs = parse_number(ENV_FRESHNESS_SECS, &raw)?;
        }
        Ok(())
    }

    /// Check every section for consistency.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.provider.validate()?;
        self.logging.validate()?;
        self.display.validate()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|_| {
        ConfigError::InvalidValue {
            field,
            reason: format!("'{raw}' is not a non-negative integer"),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Preset;
    use crate::error::Error;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml_with("", no_env).unwrap();
        assert_eq!(config.provider.preset, Preset::OpenNotify);
        assert_eq!(config.provider.timeout_ms, 5_000);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.display.map_width, 72);
    }

    #[test]
    fn parses_full_file() {
        let toml = r#"
[provider]
preset = "wheretheiss"
timeout_ms = 8000
freshness_secs = 30

[logging]
level = "debug"
format = "json"

[display]
map_width = 40
map_height = 12
marker_radius = 0
"#;
        let config = Config::parse_toml_with(toml, no_env).unwrap();
        assert_eq!(config.provider.preset, Preset::WhereTheIss);
        assert_eq!(config.provider.timeout_ms, 8000);
        assert_eq!(config.provider.freshness_secs, 30);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.display.marker_radius, 0);
    }

    #[test]
    fn parses_custom_mapping() {
        let toml = r#"
[provider]
preset = "custom"
url = "https://example.com/sat.json"

[[provider.fields]]
target = "latitude"
path = "pos.lat"
coercion = "float"

[[provider.fields]]
target = "longitude"
path = "pos.lon"
coercion = "float"

[[provider.fields]]
target = "timestamp"
path = "ts"
coercion = "integer"
"#;
        let config = Config::parse_toml_with(toml, no_env).unwrap();
        let mapping = config.provider.mapping().unwrap();
        assert_eq!(mapping.rules().len(), 3);
        assert_eq!(mapping.name(), "custom");
    }

    #[test]
    fn env_overrides_provider_settings() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SATWATCH_API_URL", "http://localhost:8080/now"),
            ("SATWATCH_TIMEOUT_MS", "1500"),
            ("SATWATCH_FRESHNESS_SECS", "0"),
        ]);
        let config =
            Config::parse_toml_with("", |key| env.get(key).map(|v| (*v).to_string())).unwrap();

        assert_eq!(config.provider.endpoint().unwrap(), "http://localhost:8080/now");
        assert_eq!(config.provider.timeout_ms, 1500);
        assert_eq!(config.provider.freshness_secs, 0);
    }

    #[test]
    fn non_numeric_env_override_is_rejected() {
        let result = Config::parse_toml_with("", |key| {
            (key == "SATWATCH_TIMEOUT_MS").then(|| "soon".to_string())
        });
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "SATWATCH_TIMEOUT_MS",
                ..
            }))
        ));
    }

    #[test]
    fn unknown_preset_is_parse_error() {
        let result = Config::parse_toml_with("[provider]\npreset = \"celestrak\"\n", no_env);
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn bad_log_format_is_rejected() {
        let result = Config::parse_toml_with("[logging]\nformat = \"xml\"\n", no_env);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            }))
        ));
    }

    #[test]
    fn tiny_map_is_rejected() {
        let result = Config::parse_toml_with("[display]\nmap_width = 4\n", no_env);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "display", .. }))
        ));
    }
}
