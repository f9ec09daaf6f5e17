use clap::Parser;
use tracing::error;

use stakeladder::adapter::inbound::cli::command::{Cli, ColorChoice, Commands};
use stakeladder::adapter::inbound::cli::output::{self, OutputConfig};
use stakeladder::adapter::inbound::cli::{config, dispatch};
use stakeladder::error::Result;
use stakeladder::infrastructure::bootstrap::build_ledger_service;
use stakeladder::infrastructure::config::settings::Config;

fn run(cli: &Cli) -> Result<()> {
    if matches!(cli.command, Commands::CheckConfig) {
        return config::check(&cli.config);
    }

    let config = Config::load_or_default(&cli.config)?;
    config.init_logging();

    let service = build_ledger_service(&config);
    dispatch(&service, &cli.command)
}

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Err(e) = run(&cli) {
        error!(error = %e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
