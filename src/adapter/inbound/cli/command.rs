//! Command-line interface definitions.
//!
//! Defines the CLI structure for satwatch using `clap`. Global flags control
//! output mode and the config file; subcommands fetch and render the
//! position once, keep it on screen, or inspect configuration.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Preset;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Live satellite position on a terminal map
#[derive(Parser, Debug)]
#[command(name = "satwatch")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity (-v debug logs, -vv trace logs)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file [default: satwatch.toml if present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the current position once and render it
    Show(ProviderOverrides),

    /// Keep the position on screen, refreshing on a timer
    Watch(WatchArgs),

    /// List built-in provider presets
    Presets,

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `satwatch check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration and print effective provider settings.
    Config(ProviderOverrides),
    /// Make one request to the configured endpoint.
    Connection(ProviderOverrides),
}

/// Per-invocation overrides of `[provider]` settings.
#[derive(Args, Debug, Default, Clone)]
pub struct ProviderOverrides {
    /// Endpoint URL (overrides config and SATWATCH_API_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Provider preset: open-notify, wheretheiss or custom.
    /// Without --url this also switches to the preset's endpoint.
    #[arg(long)]
    pub preset: Option<Preset>,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl ProviderOverrides {
    /// Apply overrides to a loaded config and re-validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the overridden config is invalid.
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(preset) = self.preset {
            if preset != config.provider.preset {
                config.provider.url = None;
                config.provider.fields.clear();
            }
            config.provider.preset = preset;
        }
        if let Some(url) = &self.url {
            config.provider.url = Some(url.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.provider.timeout_ms = timeout_ms;
        }
        config.validate()
    }
}

/// Arguments for the `watch` subcommand.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between refreshes
    #[arg(short, long, default_value = "10")]
    pub interval: u64,

    /// Stop after this many refresh cycles
    #[arg(long)]
    pub cycles: Option<u64>,

    #[command(flatten)]
    pub provider: ProviderOverrides,
}
