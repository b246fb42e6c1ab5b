//! Composition root: builds the position provider from configuration.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::http::HttpTransport;
use crate::application::position::PositionProvider;
use crate::error::Result;
use crate::infrastructure::config::ProviderConfig;
use crate::port::outbound::transport::PositionTransport;

/// Wire an HTTP transport and response mapping into a provider.
///
/// # Errors
///
/// Returns an error if the endpoint or mapping is invalid, or the HTTP
/// client cannot be built.
pub fn build_provider(config: &ProviderConfig) -> Result<PositionProvider> {
    let mapping = config.mapping()?;
    let transport = HttpTransport::from_config(config)?;

    info!(
        endpoint = %transport.endpoint(),
        preset = %config.preset,
        timeout_ms = config.timeout_ms,
        freshness_secs = config.freshness_secs,
        "Position provider configured"
    );

    Ok(PositionProvider::new(
        Arc::new(transport),
        mapping,
        config.freshness(),
    ))
}
