//! Handler for the `presets` command.

use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::Preset;

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Endpoint")]
    endpoint: &'static str,
    #[tabled(rename = "Fields")]
    fields: String,
}

fn rows() -> Vec<PresetRow> {
    Preset::BUILT_IN
        .into_iter()
        .filter_map(|preset| {
            let mapping = preset.mapping()?;
            let fields = mapping
                .rules()
                .iter()
                .map(|rule| rule.target.name())
                .collect::<Vec<_>>()
                .join(", ");
            Some(PresetRow {
                name: preset.to_string(),
                endpoint: preset.default_url().unwrap_or("-"),
                fields,
            })
        })
        .collect()
}

/// List built-in provider presets.
pub fn execute() {
    let rows = rows();

    if output::is_json() {
        for row in &rows {
            output::emit_json(
                "preset",
                json!({
                    "name": row.name,
                    "endpoint": row.endpoint,
                    "fields": row.fields.split(", ").collect::<Vec<_>>(),
                }),
            );
        }
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Provider presets");
    output::block(&Table::new(rows).to_string());
    output::hint("select one with `[provider] preset = \"<name>\"` or `--preset <name>`");
    output::note("preset = \"custom\" takes a url and [[provider.fields]] rules instead");
}
