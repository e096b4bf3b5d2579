//! CarbonTrace CLI - Estimate the carbon footprint of everyday activities.

use carbontrace_cli::commands;
use carbontrace_cli::repl;
use carbontrace_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> carbontrace_cli::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None => repl::run_repl(Default::default(), &config, &formatter).await?,
        Some(Command::Repl(args)) => repl::run_repl(args, &config, &formatter).await?,
        Some(Command::Analyze(args)) => {
            commands::execute_analyze(args, &config, &formatter).await?
        }
        Some(Command::Calculate(args)) => {
            commands::execute_calculate(args, &config, &formatter).await?
        }
        Some(Command::Factors) => commands::execute_factors(&config, &formatter).await?,
        Some(Command::History(args)) => {
            commands::execute_history(args, &config, &formatter).await?
        }
        Some(Command::Summary) => commands::execute_summary(&config, &formatter).await?,
        Some(Command::Commit(args)) => commands::execute_commit(args, &config, &formatter).await?,
    }

    Ok(())
}
