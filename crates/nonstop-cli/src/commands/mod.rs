//! Subcommand implementations.

pub mod allowlist;
pub mod check;
pub mod hook;

use crate::cli::Cli;
use nonstop_core::{CommandPolicy, Config, ConfigStore};

/// Build the policy: defaults, then the config file, then CLI overrides.
pub fn load_policy(cli: &Cli) -> anyhow::Result<CommandPolicy> {
    let store = match &cli.config {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new(),
    };
    let config = store
        .load()
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {e}", store.path().display()))?;

    let policy = CommandPolicy::new();
    config.apply(&policy);
    Config {
        allow: cli.allow.clone(),
        remove: cli.remove.clone(),
    }
    .apply(&policy);

    tracing::debug!(
        allowed = policy.allowed_commands().len(),
        "policy loaded"
    );
    Ok(policy)
}
