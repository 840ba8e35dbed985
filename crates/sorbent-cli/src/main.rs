//! Sorbent CLI - Extract biochar records from research papers.

use clap::Parser;
use sorbent_cli::commands;
use sorbent_cli::cli::{ConfigAction, ConfigArgs};
use sorbent_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout carries only results
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> sorbent_cli::Result<()> {
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    // `config init` must work even when the existing file is broken
    let config = match &cli.command {
        Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        }) => Config::default(),
        _ => Config::load(&config_path)?,
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => commands::execute_run(args, &config, &formatter).await,
        Command::Segments(args) => commands::execute_segments(args, &config, &formatter),
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)
        }
    }
}
