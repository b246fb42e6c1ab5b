//! reqwest-backed transport for the upstream position API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::infrastructure::config::ProviderConfig;
use crate::port::outbound::transport::PositionTransport;

/// Issues the single GET for a position payload.
///
/// Every request is bounded by the configured timeout. There are no
/// retries: one call, one request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
    url: String,
}

impl HttpTransport {
    /// Build a transport for `url` with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Build a transport from provider settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the config has no usable URL or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::new(
            config.endpoint()?,
            Duration::from_millis(config.timeout_ms),
            Duration::from_millis(config.connect_timeout_ms),
            &config.user_agent(),
        )
    }
}

#[async_trait]
impl PositionTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn get_json(&self) -> std::result::Result<Value, FetchError> {
        let response = self
            .http
            .get(&self.url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(url = %self.url, bytes = body.len(), "Received position payload");

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
