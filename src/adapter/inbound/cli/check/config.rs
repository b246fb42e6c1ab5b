use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::domain::ResponseMapping;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// One line per mapping rule: `target <- path (coercion)`.
fn describe_rules(mapping: &ResponseMapping) -> Vec<String> {
    mapping
        .rules()
        .iter()
        .map(|rule| {
            format!(
                "{} <- {} ({})",
                rule.target.name(),
                rule.path,
                rule.coercion
            )
        })
        .collect()
}

/// Print the effective provider settings of an already validated config.
pub fn execute_config(config: &Config, source: Option<&Path>) -> Result<()> {
    let provider = &config.provider;
    let endpoint = provider.endpoint()?;
    let mapping = provider.mapping()?;
    let rules = describe_rules(&mapping);
    let source = source.map_or_else(|| "defaults".to_string(), |p| p.display().to_string());

    if output::is_json() {
        output::emit_json(
            "config",
            json!({
                "source": source,
                "preset": provider.preset.to_string(),
                "endpoint": endpoint,
                "timeout_ms": provider.timeout_ms,
                "connect_timeout_ms": provider.connect_timeout_ms,
                "freshness_secs": provider.freshness_secs,
                "user_agent": provider.user_agent(),
                "fields": rules,
            }),
        );
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", &source);
    output::success("Configuration is valid");

    output::section("Provider");
    output::field("Preset", provider.preset);
    output::field("Endpoint", output::highlight(&endpoint));
    output::field("Timeout", format!("{} ms", provider.timeout_ms));
    output::field("Connect", format!("{} ms", provider.connect_timeout_ms));
    if provider.freshness_secs == 0 {
        output::field("Freshness", "disabled");
    } else {
        output::field("Freshness", format!("{} s", provider.freshness_secs));
    }
    output::field("User agent", provider.user_agent());

    output::section("Field mapping");
    for rule in &rules {
        output::note(rule);
    }

    output::section("Display");
    output::field(
        "Map",
        format!("{}x{}", config.display.map_width, config.display.map_height),
    );
    output::field("Marker", format!("radius {}", config.display.marker_radius));

    Ok(())
}
