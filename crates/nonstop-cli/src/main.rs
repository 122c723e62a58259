//! nonstop — allowlist gate for shell commands proposed by a coding agent.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries hook responses.
    let filter = if cli.verbose {
        EnvFilter::new("nonstop=debug,nonstop_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let policy = commands::load_policy(&cli)?;

    match cli.command {
        Commands::Check { ref command } => {
            if !commands::check::run(&policy, command) {
                std::process::exit(1);
            }
        }
        Commands::Hook => commands::hook::run(&policy)?,
        Commands::Allowlist => commands::allowlist::run(&policy),
    }

    Ok(())
}
