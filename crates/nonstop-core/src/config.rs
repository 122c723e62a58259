use crate::error::CoreError;
use crate::policy::CommandPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Startup allowlist adjustments from ~/.nonstop/config.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command base names to add to the default allowlist.
    pub allow: Vec<String>,
    /// Command base names to remove, applied after `allow`.
    pub remove: Vec<String>,
}

impl Config {
    /// Apply additions then removals to `policy`.
    pub fn apply(&self, policy: &CommandPolicy) {
        for name in &self.allow {
            policy.allow(name.as_str());
        }
        for name in &self.remove {
            policy.remove(name);
        }
    }
}

/// Location of the startup config file
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".nonstop");
        path.push("config.json");
        Self { path }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, or the default if the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error, so a
    /// broken `remove` list is never silently ignored.
    pub fn load(&self) -> Result<Config, CoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::with_path(dir.path().join("config.json"));
        assert_eq!(store.load().unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"allow":["cargo","rustc"]}"#).unwrap();

        let config = ConfigStore::with_path(&path).load().unwrap();
        assert_eq!(config.allow, vec!["cargo", "rustc"]);
        assert!(config.remove.is_empty());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"remove": "pkill"}"#).unwrap();

        let err = ConfigStore::with_path(&path).load().unwrap_err();
        assert!(matches!(err, CoreError::Serialization(_)));
    }

    #[test]
    fn test_apply_adds_then_removes() {
        let policy = CommandPolicy::new();
        let config = Config {
            allow: vec!["cargo".to_string(), "docker".to_string()],
            remove: vec!["pkill".to_string(), "docker".to_string()],
        };
        config.apply(&policy);

        assert!(policy.is_allowed("cargo"));
        assert!(!policy.is_allowed("docker"));
        assert!(!policy.is_allowed("pkill"));
        assert!(policy.is_allowed("ls"));
    }

    #[test]
    fn test_default_path() {
        let store = ConfigStore::new();
        assert!(store.path().ends_with(".nonstop/config.json"));
    }
}
