//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sandsh_types::config::ShellConfig;

/// UNIX-like shell emulator over a zip-backed sandbox.
#[derive(Debug, Parser)]
#[command(name = "sandsh", version, about)]
pub struct Cli {
    /// Host name shown in the prompt.
    #[arg(long, required_unless_present = "generate_files")]
    pub hostname: Option<String>,

    /// Zip archive holding the virtual file system.
    #[arg(long, value_name = "ARCHIVE", required_unless_present = "generate_files")]
    pub filesystem: Option<PathBuf>,

    /// Script whose lines run before the interactive prompt.
    #[arg(long, alias = "startup_script", value_name = "FILE")]
    pub startup_script: Option<PathBuf>,

    /// TOML config file; flags override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the archive is extracted into.
    #[arg(long, value_name = "DIR")]
    pub fs_root: Option<PathBuf>,

    /// Action log path; pass an empty string to disable.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Refuse `cd ..` when the parent directory does not exist.
    #[arg(long)]
    pub verify_parent: bool,

    /// Write sample fixtures (tree, archive, startup script) and exit.
    #[arg(long, alias = "generate_files")]
    pub generate_files: bool,
}

impl Cli {
    /// Merge the config file (if any) with command-line overrides.
    pub fn resolve_config(&self) -> Result<ShellConfig> {
        let mut config = match &self.config {
            Some(path) => ShellConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ShellConfig::default(),
        };
        if let Some(hostname) = &self.hostname {
            config.hostname = hostname.clone();
        }
        if let Some(root) = &self.fs_root {
            config.fs_root = root.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = log_file.clone();
        }
        if self.verify_parent {
            config.verify_parent = true;
        }
        Ok(config)
    }
}
