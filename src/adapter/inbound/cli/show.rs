//! Handler for the `show` command.

use super::{output, view};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_provider;
use crate::infrastructure::config::Config;
use crate::port::inbound::position::PositionFeed;

/// Fetch the position once and render it.
///
/// # Errors
///
/// Returns the `NotAvailable` outcome as an error so the process reports it
/// and exits non-zero.
pub async fn execute(config: &Config) -> Result<()> {
    let provider = build_provider(&config.provider)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Source", provider.endpoint());

    let pb = output::spinner("Fetching position");
    match provider.get_position().await {
        Ok(record) => {
            output::spinner_success(&pb, "Position received");
            view::render(&record, &config.display);
            Ok(())
        }
        Err(outcome) => {
            output::spinner_fail(&pb, "Fetch failed");
            Err(outcome.into())
        }
    }
}
