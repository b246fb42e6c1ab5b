use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unknown provider preset '{0}' (expected open-notify, wheretheiss or custom)")]
    UnknownPreset(String),

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Why a single position fetch failed.
///
/// These never escape the provider as-is; they are folded into
/// [`NotAvailable`] at the provider boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Upstream unreachable, DNS failure, connection refused or timeout.
    #[error("network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success HTTP status.
    #[error("upstream returned HTTP {status}")]
    Protocol { status: u16 },

    /// Body was not JSON, or a mapped field was missing or malformed.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short label for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Protocol { .. } => "protocol",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Protocol {
                status: status.as_u16(),
            };
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if err.is_timeout() {
            return Self::Network(format!("request timed out: {err}"));
        }
        Self::Network(err.to_string())
    }
}

/// No valid position could be obtained this cycle.
///
/// Carries a message suitable for display; the underlying cause is kept as
/// the error source.
#[derive(Error, Debug)]
#[error("position not available: {source}")]
pub struct NotAvailable {
    #[source]
    source: FetchError,
}

impl NotAvailable {
    /// The fetch failure behind this outcome.
    #[must_use]
    pub const fn cause(&self) -> &FetchError {
        &self.source
    }

    /// Human-readable message for warnings.
    #[must_use]
    pub fn message(&self) -> String {
        self.source.to_string()
    }
}

impl From<FetchError> for NotAvailable {
    fn from(source: FetchError) -> Self {
        Self { source }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    NotAvailable(#[from] NotAvailable),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
