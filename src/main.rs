use clap::Parser;
use tracing::{debug, info};

use satwatch::adapter::inbound::cli::check;
use satwatch::adapter::inbound::cli::command::{
    CheckCommand, Cli, ColorChoice, Commands, ProviderOverrides,
};
use satwatch::adapter::inbound::cli::output::{self, OutputConfig};
use satwatch::adapter::inbound::cli::{presets, show, watch};
use satwatch::error::Result;
use satwatch::infrastructure::config::{Config, DEFAULT_CONFIG_PATH};

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(DEFAULT_CONFIG_PATH),
    }
}

fn init_logging(config: &mut Config, verbose: u8) {
    match verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }
    config.init_logging();
}

/// Provider overrides of commands that talk to the endpoint.
const fn provider_overrides(command: &Commands) -> Option<&ProviderOverrides> {
    match command {
        Commands::Show(overrides)
        | Commands::Check(CheckCommand::Config(overrides) | CheckCommand::Connection(overrides)) => {
            Some(overrides)
        }
        Commands::Watch(args) => Some(&args.provider),
        Commands::Presets => None,
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Some(overrides) = provider_overrides(&cli.command) else {
        presets::execute();
        return Ok(());
    };

    let mut config = load_config(&cli)?;
    overrides.apply(&mut config)?;
    init_logging(&mut config, cli.verbose);
    debug!(config = ?cli.config, "Configuration loaded");

    match &cli.command {
        Commands::Show(_) => show::execute(&config).await,
        Commands::Watch(args) => watch::execute(&config, args).await,
        Commands::Check(CheckCommand::Config(_)) => {
            let source = cli.config.as_deref().or_else(|| {
                let default = std::path::Path::new(DEFAULT_CONFIG_PATH);
                default.exists().then_some(default)
            });
            check::execute_config(&config, source)
        }
        Commands::Check(CheckCommand::Connection(_)) => check::execute_connection(&config).await,
        Commands::Presets => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => output::stdout_is_terminal(),
    };
    output::configure(OutputConfig::new(
        cli.json,
        cli.quiet,
        color && !cli.json,
    ));

    if let Err(e) = run(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }

    info!("satwatch stopped");
}
