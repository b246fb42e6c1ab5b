//! Presentation of a position: map, caption, info panel and summary table.

use serde_json::json;
use tabled::{Table, Tabled};

use super::map::WorldMap;
use super::output;
use crate::domain::PositionRecord;
use crate::error::NotAvailable;
use crate::infrastructure::config::DisplayConfig;

#[derive(Tabled)]
struct PositionRow {
    #[tabled(rename = "Latitude")]
    latitude: String,
    #[tabled(rename = "Longitude")]
    longitude: String,
    #[tabled(rename = "Altitude (km)")]
    altitude: String,
    #[tabled(rename = "Velocity (km/h)")]
    velocity: String,
    #[tabled(rename = "Visibility")]
    visibility: String,
}

impl From<&PositionRecord> for PositionRow {
    fn from(record: &PositionRecord) -> Self {
        let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
        Self {
            latitude: format!("{:.6}", record.latitude),
            longitude: format!("{:.6}", record.longitude),
            altitude: or_dash(record.altitude.map(|v| format!("{v:.2}"))),
            velocity: or_dash(record.velocity.map(|v| format!("{v:.2}"))),
            visibility: or_dash(record.visibility.clone()),
        }
    }
}

/// Human-readable UTC form of the record timestamp.
#[must_use]
pub fn observed_label(record: &PositionRecord) -> String {
    record.observed_at().map_or_else(
        || format!("{} (out of range)", record.timestamp),
        |at| format!("{} ({})", record.timestamp, at.format("%Y-%m-%d %H:%M:%S UTC")),
    )
}

/// One-line caption shown under the map marker.
#[must_use]
pub fn caption(label: &str, record: &PositionRecord) -> String {
    format!(
        "@ {label}  lat {:.4}, lon {:.4}",
        record.latitude, record.longitude
    )
}

/// One-row summary table.
#[must_use]
pub fn summary_table(record: &PositionRecord) -> String {
    Table::new([PositionRow::from(record)]).to_string()
}

/// Render a full position view, or a JSON line in `--json` mode.
pub fn render(record: &PositionRecord, display: &DisplayConfig) {
    if output::is_json() {
        output::emit_json(
            "position",
            json!({
                "record": record,
                "observed_at": record.observed_at().map(|at| at.to_rfc3339()),
            }),
        );
        return;
    }

    let map = WorldMap::from_config(display);
    output::section("Current location");
    output::block(&map.render_with(record, |c| output::marker(c)));
    output::note(&caption(&display.label, record));

    output::section("Position");
    output::field("Latitude", format!("{:.6}", record.latitude));
    output::field("Longitude", format!("{:.6}", record.longitude));
    output::field("Timestamp", observed_label(record));

    if record.has_extended() {
        output::section("Telemetry");
        if let Some(altitude) = record.altitude {
            output::field("Altitude", format!("{altitude:.2} km"));
        }
        if let Some(velocity) = record.velocity {
            output::field("Velocity", format!("{velocity:.2} km/h"));
        }
        if let Some(visibility) = &record.visibility {
            output::field("Visibility", visibility);
        }
    }

    output::section("Summary");
    output::block(&summary_table(record));
}

/// Report a cycle with no data. Map and table are skipped.
pub fn render_unavailable(outcome: &NotAvailable) {
    output::warning(&format!("No position data right now: {}", outcome.message()));
}
