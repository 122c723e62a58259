//! The set of command base names permitted to run.

use std::collections::HashSet;

/// Baseline allowlist: read-only inspection, node/python/git tooling,
/// process inspection, and the three commands with extra validation.
pub const DEFAULT_ALLOWED_COMMANDS: &[&str] = &[
    // File inspection
    "ls", "cat", "head", "tail", "wc", "grep", "find", "echo",
    // File operations
    "cp", "mkdir", "chmod",
    // Directory
    "pwd",
    // Node.js
    "npm", "npx", "node", "yarn", "pnpm",
    // Python
    "python", "python3", "pip", "uv", "pytest",
    // Version control
    "git",
    // Process management
    "ps", "lsof", "sleep", "pkill",
    // Script execution
    "init.sh",
];

/// Case-sensitive set of allowed command base names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowlist {
    commands: HashSet<String>,
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::from_names(DEFAULT_ALLOWED_COMMANDS.iter().copied())
    }
}

impl Allowlist {
    /// An allowlist that permits nothing.
    pub fn empty() -> Self {
        Self {
            commands: HashSet::new(),
        }
    }

    /// Build an allowlist from the given names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact membership check.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains(name)
    }

    /// Add a name. Returns false if it was already present.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        self.commands.insert(name.into())
    }

    /// Remove a name. Returns false if it was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.commands.remove(name)
    }

    /// Sorted snapshot of every allowed name.
    pub fn sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.iter().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_baseline() {
        let allowlist = Allowlist::default();
        for name in ["ls", "git", "pkill", "chmod", "init.sh"] {
            assert!(allowlist.contains(name), "{name} should be allowed");
        }
        for name in ["rm", "sudo", "bash", "curl"] {
            assert!(!allowlist.contains(name), "{name} should not be allowed");
        }
        assert_eq!(allowlist.len(), DEFAULT_ALLOWED_COMMANDS.len());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut allowlist = Allowlist::empty();
        assert!(allowlist.add("cargo"));
        assert!(!allowlist.add("cargo"));
        assert_eq!(allowlist.len(), 1);
    }

    #[test]
    fn test_remove_non_member_is_noop() {
        let mut allowlist = Allowlist::from_names(["ls"]);
        assert!(!allowlist.remove("rm"));
        assert!(allowlist.remove("ls"));
        assert!(allowlist.is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        let allowlist = Allowlist::from_names(["ls"]);
        assert!(!allowlist.contains("LS"));
    }

    #[test]
    fn test_sorted_snapshot() {
        let allowlist = Allowlist::from_names(["pwd", "cat", "ls"]);
        assert_eq!(allowlist.sorted(), vec!["cat", "ls", "pwd"]);
    }
}
