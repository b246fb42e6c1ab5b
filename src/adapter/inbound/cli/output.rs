//! Terminal output formatting.
//!
//! Provides consistent terminal output with support for JSON mode (for
//! scripting), quiet mode, and colour control. Every printer checks the
//! global [`OutputConfig`] so handlers never branch on output mode
//! themselves.

use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::{OnceLock, RwLock};

use owo_colors::{OwoColorize, Style};
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Emit ANSI colour codes.
    pub color: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, color: bool) -> Self {
        Self { json, quiet, color }
    }
}

/// Global output configuration singleton.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Check if regular (non-JSON) output should be suppressed.
const fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn paint(value: impl Display, style: Style) -> String {
    if read_config().color {
        format!("{}", value.style(style))
    } else {
        value.to_string()
    }
}

/// Emit a JSON line with type and payload structure.
pub fn emit_json(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags.
///
/// Call this early in the CLI entry point.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Whether stdout is a terminal, for `--color auto`.
#[must_use]
pub fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json {
        emit_json(
            "header",
            json!({
                "app": "satwatch",
                "version": version,
            }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!(
        "{} {}",
        paint("satwatch", Style::new().bold()),
        paint(version, Style::new().dimmed())
    );
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();

    if config.json {
        emit_json("field", json!({ "label": label, "value": value }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", paint(format!("{label:<12}"), Style::new().dimmed()), value);
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();

    if config.json {
        emit_json("success", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", paint("✓", Style::new().green()), message);
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    if is_json() {
        emit_json("warning", json!({ "message": message }));
        return;
    }

    println!("  {} {}", paint("⚠", Style::new().yellow()), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!("  {} {}", paint("×", Style::new().red()), message);
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();

    if config.json {
        emit_json("section", json!({ "title": title }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!();
    println!("{}", paint(title, Style::new().bold()));
}

/// Print a note.
pub fn note(message: &str) {
    let config = read_config();

    if config.json {
        emit_json("note", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {}", paint(message, Style::new().dimmed()));
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    let config = read_config();

    if config.json {
        emit_json("hint", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", paint("hint:", Style::new().cyan().bold()), message);
}

/// Print pre-rendered lines (map, table) with the standard indent.
pub fn block(text: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }
    for line in text.lines() {
        println!("  {line}");
    }
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    paint(value, Style::new().cyan())
}

/// Format the map marker in bold red.
pub fn marker(value: impl Display) -> String {
    paint(value, Style::new().red().bold())
}

/// Braille spinner animation frames.
const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Create and start a progress spinner.
///
/// Returns a hidden progress bar in JSON or quiet mode.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let config = read_config();
    if config.json || config.quiet {
        let pb = indicatif::ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let pb = indicatif::ProgressBar::new_spinner();
    let style = indicatif::ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success checkmark.
pub fn spinner_success(pb: &indicatif::ProgressBar, message: &str) {
    let config = read_config();
    if config.json || config.quiet {
        pb.finish_and_clear();
        return;
    }

    pb.finish_with_message(format!("{} {}", paint("✓", Style::new().green()), message));
}

/// Finish a spinner with a failure mark.
pub fn spinner_fail(pb: &indicatif::ProgressBar, message: &str) {
    if read_config().json {
        pb.finish_and_clear();
        return;
    }

    pb.finish_with_message(format!("{} {}", paint("×", Style::new().red()), message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_config_carries_mode_flags() {
        let config = OutputConfig::new(true, false, true);
        assert!(config.json);
        assert!(!config.quiet);
        assert!(config.color);
    }

    #[test]
    fn default_output_is_plain_text() {
        let config = OutputConfig::default();
        assert!(!config.json && !config.quiet && !config.color);
        assert!(!regular_output_suppressed(OutputConfig::new(true, true, false)));
        assert!(regular_output_suppressed(OutputConfig::new(false, true, false)));
    }
}
