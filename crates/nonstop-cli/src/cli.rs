//! CLI argument and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nonstop", version, about = "Allowlist gate for agent shell commands")]
pub struct Cli {
    /// Config file (defaults to ~/.nonstop/config.json).
    #[arg(long, global = true, env = "NONSTOP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Allow an extra command name. Repeatable.
    #[arg(long, value_name = "CMD", global = true, env = "NONSTOP_ALLOW", value_delimiter = ',')]
    pub allow: Vec<String>,

    /// Remove a command name from the allowlist. Repeatable.
    #[arg(long, value_name = "CMD", global = true, env = "NONSTOP_REMOVE", value_delimiter = ',')]
    pub remove: Vec<String>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authorize a single command string.
    Check {
        /// The shell command to check.
        command: String,
    },

    /// Answer one pre-tool-use hook request read from stdin.
    Hook,

    /// Print the effective allowlist.
    Allowlist,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_with_overrides() {
        let cli = Cli::try_parse_from([
            "nonstop", "--allow", "cargo", "--allow", "go,rustc", "check", "cargo build",
        ])
        .unwrap();
        assert_eq!(cli.allow, vec!["cargo", "go", "rustc"]);
        assert!(cli.remove.is_empty());
        match cli.command {
            Commands::Check { command } => assert_eq!(command, "cargo build"),
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nonstop", "hook", "--remove", "pkill", "-v"]).unwrap();
        assert_eq!(cli.remove, vec!["pkill"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Hook));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["nonstop"]).is_err());
    }
}
