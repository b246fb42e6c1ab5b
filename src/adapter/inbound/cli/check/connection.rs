use serde_json::json;

use crate::adapter::inbound::cli::{output, view};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_provider;
use crate::infrastructure::config::Config;
use crate::port::inbound::position::PositionFeed;

/// Make one uncached request to the configured endpoint and report it.
pub async fn execute_connection(config: &Config) -> Result<()> {
    let provider = build_provider(&config.provider)?;

    if !output::is_json() {
        output::section("Connection Check");
        output::field("Endpoint", provider.endpoint());
        output::field("Mapping", provider.mapping().name());
    }

    let pb = output::spinner("Requesting position...");
    match provider.refresh_now().await {
        Ok(record) => {
            output::spinner_success(&pb, "Endpoint answered with a valid position");
            if output::is_json() {
                output::emit_json(
                    "connection",
                    json!({
                        "endpoint": provider.endpoint(),
                        "ok": true,
                        "record": record.as_ref(),
                    }),
                );
            } else {
                output::field("Observed", view::observed_label(&record));
                output::field(
                    "Coordinates",
                    format!("{:.6}, {:.6}", record.latitude, record.longitude),
                );
                output::success("Connection check passed");
            }
            Ok(())
        }
        Err(outcome) => {
            output::spinner_fail(&pb, "Endpoint check failed");
            if output::is_json() {
                output::emit_json(
                    "connection",
                    json!({
                        "endpoint": provider.endpoint(),
                        "ok": false,
                        "kind": outcome.cause().kind(),
                        "message": outcome.message(),
                    }),
                );
            }
            Err(outcome.into())
        }
    }
}
