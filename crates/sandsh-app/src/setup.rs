//! Sandbox extraction and shell assembly.

use std::path::Path;

use anyhow::{Context, Result};
use sandsh_platform::DesktopPlatform;
use sandsh_terminal::{JsonActionLog, Shell};
use sandsh_types::config::ShellConfig;
use sandsh_vfs::archive::extract_archive;
use sandsh_vfs::{HostVfs, ParentPolicy, VirtualPathResolver};

/// Extract `archive` into the configured sandbox and build a shell over it.
pub fn build_shell(config: &ShellConfig, archive: &Path) -> Result<Shell> {
    extract_archive(archive, &config.fs_root).with_context(|| {
        format!(
            "extracting {} into {}",
            archive.display(),
            config.fs_root.display()
        )
    })?;

    let policy = if config.verify_parent {
        ParentPolicy::Verify
    } else {
        ParentPolicy::Permissive
    };
    let resolver = VirtualPathResolver::new(&config.fs_root).with_parent_policy(policy);
    let platform = DesktopPlatform::new();

    let mut shell = Shell::new(&config.hostname, resolver, Box::new(HostVfs::new()))
        .with_identity(Box::new(platform.clone()))
        .with_sessions(Box::new(platform));
    if config.log_enabled() {
        log::info!("Action log: {}", config.log_file.display());
        shell = shell.with_sink(Box::new(JsonActionLog::new(&config.log_file)));
    }
    Ok(shell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::generate_files;
    use sandsh_terminal::ActionRecord;
    use sandsh_terminal::audit::read_records;

    fn config_in(dir: &Path) -> ShellConfig {
        ShellConfig {
            hostname: "test-host".to_string(),
            fs_root: dir.join("sandbox"),
            log_file: dir.join("shell_log.json"),
            verify_parent: false,
        }
    }

    #[test]
    fn end_to_end_over_generated_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let fixtures = generate_files(dir.path()).unwrap();
        let config = config_in(dir.path());
        let mut shell = build_shell(&config, &fixtures.archive).unwrap();

        let listing = shell.run_line("ls");
        let mut names: Vec<&str> = listing.split("  ").collect();
        names.sort_unstable();
        assert_eq!(names, vec!["file1.txt", "file2.txt", "subdir"]);

        assert_eq!(shell.run_line("cd subdir"), "Changed to directory: /subdir");
        assert_eq!(shell.run_line("ls"), "file3.txt");
        assert_eq!(shell.run_line("cd .."), "Changed to directory: /");
        assert_eq!(
            shell.run_line("uniq file2.txt"),
            "This is the content of file 2.\n"
        );
        assert_eq!(
            shell.run_line("uniq missing.txt"),
            "File 'missing.txt' does not exist."
        );

        let log = std::fs::read_to_string(&config.log_file).unwrap();
        let records: Vec<ActionRecord> = read_records(&log).unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(records[1].command, "cd subdir");
    }

    #[test]
    fn startup_script_from_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let fixtures = generate_files(dir.path()).unwrap();
        let mut config = config_in(dir.path());
        config.log_file = Default::default();
        let mut shell = build_shell(&config, &fixtures.archive).unwrap();

        let script = std::fs::read_to_string(&fixtures.startup_script).unwrap();
        let steps = shell.run_script(&script);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[1].output, "Changed to directory: /subdir");
        assert_eq!(steps[2].output, "file3.txt");
        assert_eq!(steps[3].command, "whoami");
        assert!(!steps[3].output.is_empty());
        assert!(!steps[3].output.starts_with("platform error"));
        assert_eq!(steps[4].output, "Changed to directory: /");
        assert!(!dir.path().join("shell_log.json").exists());
    }

    #[test]
    fn missing_archive_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(build_shell(&config, &dir.path().join("nope.zip")).is_err());
    }
}
