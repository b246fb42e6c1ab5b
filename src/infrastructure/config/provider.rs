//! Upstream provider settings: endpoint, timeouts, freshness and mapping.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::application::position::DEFAULT_FRESHNESS;
use crate::domain::{FieldRule, Preset, ResponseMapping};
use crate::error::{ConfigError, Result};

/// Settings for the position provider.
///
/// `url` defaults to the preset's endpoint. `fields` is only read when
/// `preset = "custom"`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub preset: Preset,
    #[serde(default)]
    pub url: Option<String>,
    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// How long a fetched position is served without a new request.
    /// Zero disables the memo.
    #[serde(default = "default_freshness_secs")]
    pub freshness_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldRule>,
}

const fn default_timeout_ms() -> u64 {
    5_000
}

const fn default_connect_timeout_ms() -> u64 {
    3_000
}

const fn default_freshness_secs() -> u64 {
    DEFAULT_FRESHNESS.as_secs()
}

impl ProviderConfig {
    /// The endpoint to request: explicit `url`, else the preset default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for a custom preset without a URL.
    pub fn endpoint(&self) -> Result<String> {
        match (&self.url, self.preset.default_url()) {
            (Some(url), _) if !url.trim().is_empty() => Ok(url.trim().to_string()),
            (_, Some(default)) => Ok(default.to_string()),
            _ => Err(ConfigError::MissingField {
                field: "provider.url",
            }
            .into()),
        }
    }

    /// The response mapping for the configured preset.
    ///
    /// # Errors
    ///
    /// Fails when a custom mapping is incomplete, or when `fields` is set
    /// for a built-in preset.
    pub fn mapping(&self) -> Result<ResponseMapping> {
        if let Some(mapping) = self.preset.mapping() {
            if !self.fields.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "provider.fields",
                    reason: format!(
                        "custom fields require preset = \"custom\" (preset is {})",
                        self.preset
                    ),
                }
                .into());
            }
            return Ok(mapping);
        }

        if self.fields.is_empty() {
            return Err(ConfigError::MissingField {
                field: "provider.fields",
            }
            .into());
        }
        Ok(ResponseMapping::new(
            self.preset.to_string(),
            self.fields.clone(),
        )?)
    }

    #[must_use]
    pub const fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("satwatch/{}", env!("CARGO_PKG_VERSION")))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint()?;
        let url = Url::parse(&endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "provider.url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "provider.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "provider.connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        self.mapping()?;
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            url: None,
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            freshness_secs: default_freshness_secs(),
            user_agent: None,
            fields: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coercion, RecordField};
    use crate::error::Error;

    #[test]
    fn default_uses_open_notify() {
        let config = ProviderConfig::default();
        assert_eq!(
            config.endpoint().unwrap(),
            "http://api.open-notify.org/iss-now.json"
        );
        assert_eq!(config.mapping().unwrap(), ResponseMapping::open_notify());
        assert_eq!(config.freshness(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_url_wins_over_preset() {
        let config = ProviderConfig {
            preset: Preset::WhereTheIss,
            url: Some("http://127.0.0.1:9000/iss".into()),
            ..Default::default()
        };
        assert_eq!(config.endpoint().unwrap(), "http://127.0.0.1:9000/iss");
    }

    #[test]
    fn custom_preset_requires_url_and_fields() {
        let config = ProviderConfig {
            preset: Preset::Custom,
            ..Default::default()
        };
        assert!(matches!(
            config.endpoint(),
            Err(Error::Config(ConfigError::MissingField { field: "provider.url" }))
        ));
        assert!(matches!(
            config.mapping(),
            Err(Error::Config(ConfigError::MissingField { field: "provider.fields" }))
        ));
    }

    #[test]
    fn fields_on_built_in_preset_are_rejected() {
        let config = ProviderConfig {
            fields: vec![FieldRule::new(RecordField::Latitude, "lat", Coercion::Float)],
            ..Default::default()
        };
        assert!(matches!(
            config.mapping(),
            Err(Error::Config(ConfigError::InvalidValue { field: "provider.fields", .. }))
        ));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let config = ProviderConfig {
            url: Some("ftp://example.com/iss".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = ProviderConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue { field: "provider.timeout_ms", .. }))
        ));
    }
}
