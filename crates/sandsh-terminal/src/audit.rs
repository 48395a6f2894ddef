//! Action log: a JSON record of every executed command and its result.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use sandsh_types::error::Result;

/// Receives `(command, result)` pairs after each command runs.
pub trait ActionSink {
    fn record(&mut self, command: &str, result: &str);
}

/// One log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Local time the command finished, ISO 8601 without offset.
    pub timestamp: String,
    pub command: String,
    /// Rendered result; `"None"` when the command printed nothing.
    pub result: String,
}

impl ActionRecord {
    pub fn now(command: &str, result: &str) -> Self {
        Self {
            timestamp: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            command: command.to_string(),
            result: if result.is_empty() {
                "None".to_string()
            } else {
                result.to_string()
            },
        }
    }
}

/// Keeps every record in memory and rewrites the whole file after each one.
#[derive(Debug)]
pub struct JsonActionLog {
    path: PathBuf,
    entries: Vec<ActionRecord>,
}

impl JsonActionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[ActionRecord] {
        &self.entries
    }

    /// Write all entries as a JSON array indented by four spaces.
    pub fn flush(&self) -> Result<()> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.entries.serialize(&mut ser)?;
        fs::write(&self.path, buf)?;
        Ok(())
    }
}

/// Parse the contents of a log file written by [`JsonActionLog`].
pub fn read_records(text: &str) -> Result<Vec<ActionRecord>> {
    Ok(serde_json::from_str(text)?)
}

impl ActionSink for JsonActionLog {
    fn record(&mut self, command: &str, result: &str) {
        self.entries.push(ActionRecord::now(command, result));
        if let Err(e) = self.flush() {
            log::warn!("Failed to write action log {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_written_as_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell_log.json");
        let mut log = JsonActionLog::new(&path);
        log.record("ls", "file1.txt  subdir");
        log.record("cd nowhere", "Directory 'nowhere' does not exist.");

        let text = fs::read_to_string(&path).unwrap();
        let parsed = read_records(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].command, "ls");
        assert_eq!(parsed[1].result, "Directory 'nowhere' does not exist.");
        assert_eq!(parsed, log.entries());
        assert!(text.contains("\n    {"));
    }

    #[test]
    fn empty_result_recorded_as_none() {
        let record = ActionRecord::now("who", "");
        assert_eq!(record.result, "None");
        assert!(record.timestamp.contains('T'));
    }

    #[test]
    fn non_ascii_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        let mut log = JsonActionLog::new(&path);
        log.record("uniq file1.txt", "строка1\n");
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("строка1"));
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = JsonActionLog::new(dir.path().join("missing").join("log.json"));
        log.record("ls", "x");
        assert_eq!(log.entries().len(), 1);
    }
}
