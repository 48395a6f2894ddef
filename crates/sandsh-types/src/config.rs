//! Shell configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to override:
//!
//! ```toml
//! hostname = "lab-01"
//! fs_root = "/tmp/lab-01-fs"
//! log_file = "lab.json"
//! verify_parent = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ShellError};

/// Directory name used for the sandbox under the system temp dir.
pub const DEFAULT_SANDBOX_DIR: &str = "shell_emulator_fs";

/// Default action log file name.
pub const DEFAULT_LOG_FILE: &str = "shell_log.json";

/// Runtime configuration for one shell session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Host name shown in the prompt.
    pub hostname: String,
    /// Physical directory the archive is extracted into.
    pub fs_root: PathBuf,
    /// Action log path. An empty path disables the log.
    pub log_file: PathBuf,
    /// Check that the parent directory exists before `cd ..` commits.
    pub verify_parent: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            fs_root: std::env::temp_dir().join(DEFAULT_SANDBOX_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            verify_parent: false,
        }
    }
}

impl ShellConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ShellError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Whether the action log is enabled.
    pub fn log_enabled(&self) -> bool {
        !self.log_file.as_os_str().is_empty()
    }

    fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(ShellError::Config("hostname must not be empty".to_string()));
        }
        if self.fs_root.as_os_str().is_empty() {
            return Err(ShellError::Config("fs_root must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ShellConfig::default();
        assert_eq!(cfg.hostname, "localhost");
        assert!(cfg.fs_root.ends_with(DEFAULT_SANDBOX_DIR));
        assert_eq!(cfg.log_file, PathBuf::from("shell_log.json"));
        assert!(!cfg.verify_parent);
        assert!(cfg.log_enabled());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = ShellConfig::from_toml_str("hostname = \"lab\"\n").unwrap();
        assert_eq!(cfg.hostname, "lab");
        assert_eq!(cfg.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn full_toml() {
        let cfg = ShellConfig::from_toml_str(
            "hostname = \"lab\"\nfs_root = \"/tmp/x\"\nlog_file = \"\"\nverify_parent = true\n",
        )
        .unwrap();
        assert_eq!(cfg.fs_root, PathBuf::from("/tmp/x"));
        assert!(!cfg.log_enabled());
        assert!(cfg.verify_parent);
    }

    #[test]
    fn empty_hostname_rejected() {
        let err = ShellConfig::from_toml_str("hostname = \"  \"\n").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }

    #[test]
    fn bad_toml_rejected() {
        let err = ShellConfig::from_toml_str("hostname = [").unwrap_err();
        assert!(matches!(err, ShellError::TomlParse(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sandsh.toml");
        std::fs::write(&path, "hostname = \"from-file\"\n").unwrap();
        let cfg = ShellConfig::load(&path).unwrap();
        assert_eq!(cfg.hostname, "from-file");
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }
}
