//! The owned command policy and its authorization call.

use crate::allowlist::Allowlist;
use crate::decision::Decision;
use crate::extract::extract_commands;
use crate::segment::{split_segments, split_stages};
use crate::validate::RestrictedCommand;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Allowlist-based authorization for shell commands.
///
/// Authorization calls take a read lock; `allow`/`remove` take the write
/// lock. Share one policy between threads with an `Arc`.
#[derive(Debug, Default)]
pub struct CommandPolicy {
    allowlist: RwLock<Allowlist>,
}

impl CommandPolicy {
    /// A policy seeded with the default allowlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that denies every command until names are added.
    pub fn empty() -> Self {
        Self::from_allowlist(Allowlist::empty())
    }

    /// A policy seeded with exactly the given names.
    pub fn with_commands<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_allowlist(Allowlist::from_names(names))
    }

    pub fn from_allowlist(allowlist: Allowlist) -> Self {
        Self {
            allowlist: RwLock::new(allowlist),
        }
    }

    /// Permit a command base name. Returns false if it was already allowed.
    pub fn allow(&self, name: impl Into<String>) -> bool {
        let name = name.into();
        tracing::debug!(command = %name, "adding command to allowlist");
        self.write().add(name)
    }

    /// Revoke a command base name. Returns false if it was not allowed.
    pub fn remove(&self, name: &str) -> bool {
        tracing::debug!(command = %name, "removing command from allowlist");
        self.write().remove(name)
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.read().contains(name)
    }

    /// Sorted snapshot of the current allowlist.
    pub fn allowed_commands(&self) -> Vec<String> {
        self.read().sorted()
    }

    /// Decide whether `command` may be handed to the shell.
    ///
    /// Every extracted command must be allowlisted, and restricted commands
    /// must also pass their argument check. The first violation is reported.
    /// Input that cannot be tokenized, or that names no command, is denied.
    /// The n-th invocation of a restricted command is checked against the
    /// n-th pipeline stage that invokes it, not only the first.
    pub fn authorize(&self, command: &str) -> Decision {
        let commands = match extract_commands(command) {
            Ok(commands) if !commands.is_empty() => commands,
            Ok(_) => return denied(command, format!("Could not parse command: {command}")),
            Err(err) => {
                tracing::warn!(command, error = %err, "failed to tokenize command");
                return denied(command, format!("Could not parse command: {command}"));
            }
        };
        tracing::debug!(command, ?commands, "authorizing command");

        let stages: Vec<String> = split_segments(command)
            .iter()
            .flat_map(|segment| split_stages(segment))
            .collect();
        let allowlist = self.read();
        let mut occurrences: HashMap<&str, usize> = HashMap::new();

        for name in &commands {
            if !allowlist.contains(name) {
                return denied(command, format!("Command '{name}' is not in the allowed list"));
            }

            let Some(restricted) = RestrictedCommand::from_name(name) else {
                continue;
            };
            let occurrence = occurrences.entry(name.as_str()).or_insert(0);
            let stage = owning_stage(name, *occurrence, &stages, command);
            *occurrence += 1;

            if let Err(rejection) = restricted.validate(stage) {
                return denied(command, rejection.to_string());
            }
        }

        Decision::Allow
    }

    fn read(&self) -> RwLockReadGuard<'_, Allowlist> {
        self.allowlist.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Allowlist> {
        self.allowlist.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn denied(command: &str, reason: String) -> Decision {
    tracing::info!(command, reason = %reason, "command denied");
    Decision::deny(reason)
}

/// The pipeline stage backing the `occurrence`-th invocation of `name`.
///
/// Falls back to the whole command when no stage extracts the name.
fn owning_stage<'a>(name: &str, occurrence: usize, stages: &'a [String], raw: &'a str) -> &'a str {
    stages
        .iter()
        .flat_map(|stage| {
            extract_commands(stage)
                .unwrap_or_default()
                .into_iter()
                .map(move |found| (stage, found))
        })
        .filter(|(_, found)| found == name)
        .nth(occurrence)
        .map_or(raw, |(stage, _)| stage.as_str())
}
