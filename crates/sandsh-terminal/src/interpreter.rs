//! Command trait, registry, and dispatch logic.

use std::collections::HashMap;

use sandsh_platform::{IdentityService, SessionService};
use sandsh_types::error::{Result, ShellError};
use sandsh_vfs::{VirtualPathResolver, Vfs};

/// Output produced by a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text.
    Text(String),
    /// Nothing to show (blank input line).
    None,
    /// Signal to end the session.
    Exit,
}

/// Current working directory of one shell session.
///
/// Always a `/`-rooted virtual path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    cwd: String,
}

impl Session {
    /// Start a session at `/`.
    pub fn new() -> Self {
        Self {
            cwd: "/".to_string(),
        }
    }

    /// Start a session at an arbitrary virtual directory.
    ///
    /// The directory is not checked against the sandbox.
    pub fn with_cwd(cwd: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set_cwd(cwd);
        session
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn set_cwd(&mut self, cwd: impl Into<String>) {
        let cwd = cwd.into();
        self.cwd = if cwd.starts_with('/') {
            cwd
        } else {
            format!("/{cwd}")
        };
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed context passed to every command.
pub struct Environment<'a> {
    /// Mutable session state.
    pub session: &'a mut Session,
    /// Virtual-to-physical path mapping for the sandbox.
    pub resolver: &'a VirtualPathResolver,
    /// File system queries over the sandbox.
    pub vfs: &'a dyn Vfs,
    /// Identity service for `whoami`.
    pub identity: Option<&'a dyn IdentityService>,
    /// Session listing service for `who`.
    pub sessions: Option<&'a dyn SessionService>,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// Usage string, reported on argument errors.
    fn usage(&self) -> &str;

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands with dispatch.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Parse and execute a command line.
    ///
    /// The line is split on whitespace and the first token must equal a
    /// registered name exactly. Blank lines produce `CommandOutput::None`.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(CommandOutput::None);
        };

        match self.commands.get(name) {
            Some(cmd) => {
                log::debug!("dispatch {name} {args:?} in {}", env.session.cwd());
                cmd.execute(args, env)
            },
            None => Err(ShellError::UnsupportedCommand(line.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandsh_vfs::MemoryVfs;

    struct EchoCmd;
    impl Command for EchoCmd {
        fn name(&self) -> &str {
            "echo"
        }
        fn usage(&self) -> &str {
            "echo [text...]"
        }
        fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::Text(args.join(" ")))
        }
    }

    fn exec(reg: &CommandRegistry, line: &str) -> Result<CommandOutput> {
        let vfs = MemoryVfs::new();
        let resolver = VirtualPathResolver::new("/");
        let mut session = Session::new();
        let mut env = Environment {
            session: &mut session,
            resolver: &resolver,
            vfs: &vfs,
            identity: None,
            sessions: None,
        };
        reg.execute(line, &mut env)
    }

    #[test]
    fn register_and_execute() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoCmd));
        assert_eq!(
            exec(&reg, "echo hello   world").unwrap(),
            CommandOutput::Text("hello world".to_string())
        );
    }

    #[test]
    fn blank_line_is_noop() {
        let reg = CommandRegistry::new();
        assert_eq!(exec(&reg, "   ").unwrap(), CommandOutput::None);
        assert_eq!(exec(&reg, "").unwrap(), CommandOutput::None);
    }

    #[test]
    fn unknown_command() {
        let reg = CommandRegistry::new();
        let err = exec(&reg, "nonexistent arg").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command 'nonexistent arg' is not supported."
        );
    }

    #[test]
    fn unknown_command_echoes_line_verbatim() {
        let reg = CommandRegistry::new();
        let err = exec(&reg, "  frob  ").unwrap_err();
        assert_eq!(err.to_string(), "Command '  frob  ' is not supported.");
    }

    #[test]
    fn prefix_does_not_match() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoCmd));
        assert!(matches!(
            exec(&reg, "echoes hi"),
            Err(ShellError::UnsupportedCommand(_))
        ));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoCmd));
        assert!(matches!(
            exec(&reg, "ECHO hi"),
            Err(ShellError::UnsupportedCommand(_))
        ));
        assert!(exec(&reg, "echo hi").is_ok());
    }

    #[test]
    fn session_starts_at_root() {
        assert_eq!(Session::new().cwd(), "/");
        assert_eq!(Session::with_cwd("subdir").cwd(), "/subdir");
    }
}
