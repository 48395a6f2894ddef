//! Error types for sandsh.
//!
//! Command failures carry the exact user-facing message in their `Display`
//! impl, so a front-end can render any `ShellError` directly.

use std::io;

/// Errors produced by the shell, its commands, and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Path '{0}' does not exist.")]
    PathNotFound(String),

    #[error("Path '{0}' is not a directory.")]
    NotADirectory(String),

    #[error("Directory '{0}' does not exist.")]
    DirectoryNotFound(String),

    #[error("File '{0}' does not exist.")]
    FileNotFound(String),

    #[error("File '{0}' is a directory.")]
    IsADirectory(String),

    #[error("Command '{0}' is not supported.")]
    UnsupportedCommand(String),

    #[error("usage: {0}")]
    Usage(String),

    #[error("shell session has terminated")]
    Terminated,

    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShellError {
    /// Whether this error is an ordinary command outcome (bad path, unknown
    /// command, bad arguments) rather than a fault in the environment.
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Self::PathNotFound(_)
                | Self::NotADirectory(_)
                | Self::DirectoryNotFound(_)
                | Self::FileNotFound(_)
                | Self::IsADirectory(_)
                | Self::UnsupportedCommand(_)
                | Self::Usage(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
