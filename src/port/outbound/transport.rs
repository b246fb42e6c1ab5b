//! Transport port for the single upstream GET.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Performs the outbound request for a position payload.
///
/// Implementations issue one GET per call, with no retries, and return the
/// parsed JSON body. Status and network failures are reported as
/// [`FetchError::Protocol`] and [`FetchError::Network`]; a body that is not
/// JSON is a [`FetchError::Decode`].
#[async_trait]
pub trait PositionTransport: Send + Sync {
    /// Endpoint this transport targets, for logs and display.
    fn endpoint(&self) -> &str;

    /// Fetch and parse the response body.
    async fn get_json(&self) -> Result<Value, FetchError>;
}
