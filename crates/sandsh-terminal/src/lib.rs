//! Command interpreter for the sandboxed shell.
//!
//! Commands implement the `Command` trait and are registered by name. The
//! registry tokenizes a line, matches the first token exactly, and dispatches
//! `execute()`. `Shell` wraps the registry with the session state, the host
//! services, and an optional action log.

pub mod audit;
mod commands;
mod interpreter;
mod shell;
mod system_commands;
mod text_commands;

/// Append-only record of executed commands.
pub use audit::{ActionRecord, ActionSink, JsonActionLog};
/// Register the built-in commands (ls, cd, whoami, who, exit, uniq).
pub use commands::register_builtins;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a successful command.
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Borrowed context passed to every command.
pub use interpreter::Environment;
/// Current working directory of one shell session.
pub use interpreter::Session;
/// Session lifecycle wrapper around the registry.
pub use shell::{FAREWELL, ScriptStep, Shell, ShellState, render_result};
/// Stable, first-occurrence line deduplication.
pub use text_commands::stable_dedup;
