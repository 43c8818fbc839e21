use clap::Parser;
use colored::Colorize;

use livecheck_cli::cli::Cli;
use livecheck_cli::commands;
use livecheck_cli::error::CliError;
use livecheck_cli::logging;
use livecheck_core::config::LivecheckConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = LivecheckConfig::load_or_default(cli.config.as_deref()).await?;
    if let Some(level) = &cli.log_level {
        config.general.log_level = level.to_lowercase();
        config.validate()?;
    }

    logging::init_tracing(&config.general, cli.verbosity())
        .map_err(|e| CliError::Config(e.to_string()))?;

    tracing::debug!(config = ?cli.config, "livecheck starting");

    commands::check::execute(&cli, config).await?;
    Ok(())
}
