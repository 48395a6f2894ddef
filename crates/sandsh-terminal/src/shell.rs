//! Session lifecycle: one registry, one session, one sandbox.

use sandsh_platform::{IdentityService, SessionService};
use sandsh_types::error::{Result, ShellError};
use sandsh_vfs::{VirtualPathResolver, Vfs};

use crate::audit::ActionSink;
use crate::commands::register_builtins;
use crate::interpreter::{CommandOutput, CommandRegistry, Environment, Session};

/// Printed when the session ends through `exit`.
pub const FAREWELL: &str = "Exiting the emulator.";

/// Whether the shell still accepts commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Running,
    Terminated,
}

/// One executed line of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    /// Prompt in effect before the line ran.
    pub prompt: String,
    pub command: String,
    pub output: String,
}

/// Render a command result as the text a user sees.
pub fn render_result(result: &Result<CommandOutput>) -> String {
    match result {
        Ok(CommandOutput::Text(text)) => text.clone(),
        Ok(CommandOutput::None) => String::new(),
        Ok(CommandOutput::Exit) => FAREWELL.to_string(),
        Err(e) => e.to_string(),
    }
}

/// An interactive shell over a sandboxed file tree.
pub struct Shell {
    hostname: String,
    registry: CommandRegistry,
    session: Session,
    resolver: VirtualPathResolver,
    vfs: Box<dyn Vfs>,
    identity: Option<Box<dyn IdentityService>>,
    sessions: Option<Box<dyn SessionService>>,
    sink: Option<Box<dyn ActionSink>>,
    state: ShellState,
}

impl Shell {
    /// Create a shell with the built-in commands registered.
    pub fn new(
        hostname: impl Into<String>,
        resolver: VirtualPathResolver,
        vfs: Box<dyn Vfs>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        Self {
            hostname: hostname.into(),
            registry,
            session: Session::new(),
            resolver,
            vfs,
            identity: None,
            sessions: None,
            sink: None,
            state: ShellState::Running,
        }
    }

    pub fn with_identity(mut self, identity: Box<dyn IdentityService>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_sessions(mut self, sessions: Box<dyn SessionService>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn ActionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ShellState::Running
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `<hostname>:<cwd>$ `
    pub fn prompt(&self) -> String {
        format!("{}:{}$ ", self.hostname, self.session.cwd())
    }

    /// Execute one line.
    ///
    /// `exit` moves the shell to `Terminated`; every later call fails with
    /// `ShellError::Terminated`. Non-blank lines are reported to the sink.
    pub fn execute(&mut self, line: &str) -> Result<CommandOutput> {
        if self.state == ShellState::Terminated {
            return Err(ShellError::Terminated);
        }

        let mut env = Environment {
            session: &mut self.session,
            resolver: &self.resolver,
            vfs: &*self.vfs,
            identity: self.identity.as_deref(),
            sessions: self.sessions.as_deref(),
        };
        let result = self.registry.execute(line, &mut env);

        match &result {
            Ok(CommandOutput::Exit) => {
                log::info!("Session terminated by exit");
                self.state = ShellState::Terminated;
            },
            Err(e) if !e.is_command_error() => log::warn!("{line}: {e}"),
            _ => {},
        }

        if !line.trim().is_empty()
            && let Some(sink) = self.sink.as_mut()
        {
            sink.record(line, &render_result(&result));
        }
        result
    }

    /// Execute one line and render the outcome as text.
    pub fn run_line(&mut self, line: &str) -> String {
        render_result(&self.execute(line))
    }

    /// Run a script line by line.
    ///
    /// Lines are trimmed of trailing whitespace; blank lines are skipped.
    /// Failing lines do not stop the script, but `exit` does.
    pub fn run_script(&mut self, source: &str) -> Vec<ScriptStep> {
        let mut steps = Vec::new();
        for line in source.lines() {
            let command = line.trim_end();
            if command.trim().is_empty() {
                continue;
            }
            let prompt = self.prompt();
            let output = self.run_line(command);
            steps.push(ScriptStep {
                prompt,
                command: command.to_string(),
                output,
            });
            if !self.is_running() {
                break;
            }
        }
        log::info!("Startup script ran {} commands", steps.len());
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use sandsh_platform::StaticPlatform;
    use sandsh_vfs::MemoryVfs;

    #[derive(Clone, Default)]
    struct RecordingSink(Rc<RefCell<Vec<(String, String)>>>);

    impl ActionSink for RecordingSink {
        fn record(&mut self, command: &str, result: &str) {
            self.0
                .borrow_mut()
                .push((command.to_string(), result.to_string()));
        }
    }

    fn sandbox() -> MemoryVfs {
        let mut vfs = MemoryVfs::new();
        vfs.write("/file1.txt", b"a\nb\na\nc\nb\n").unwrap();
        vfs.write("/file2.txt", b"x\n").unwrap();
        vfs.mkdir("/subdir").unwrap();
        vfs.write("/subdir/file3.txt", b"y\n").unwrap();
        vfs
    }

    fn shell() -> Shell {
        let platform = StaticPlatform::new("tester", " tester pts/0 \n");
        Shell::new("test-host", VirtualPathResolver::new("/"), Box::new(sandbox()))
            .with_identity(Box::new(platform.clone()))
            .with_sessions(Box::new(platform))
    }

    #[test]
    fn prompt_tracks_cwd() {
        let mut sh = shell();
        assert_eq!(sh.prompt(), "test-host:/$ ");
        sh.execute("cd subdir").unwrap();
        assert_eq!(sh.prompt(), "test-host:/subdir$ ");
    }

    #[test]
    fn run_line_renders_success_and_error() {
        let mut sh = shell();
        assert_eq!(sh.run_line("cd subdir"), "Changed to directory: /subdir");
        assert_eq!(sh.run_line("cd .."), "Changed to directory: /");
        assert_eq!(
            sh.run_line("cd doesnotexist"),
            "Directory 'doesnotexist' does not exist."
        );
        assert_eq!(sh.session().cwd(), "/");
        assert_eq!(sh.run_line("uniq file1.txt"), "a\nb\nc\n");
        assert_eq!(sh.run_line("frobnicate"), "Command 'frobnicate' is not supported.");
    }

    #[test]
    fn unsupported_line_is_echoed_with_its_whitespace() {
        let mut sh = shell();
        assert_eq!(sh.run_line("  frob  "), "Command '  frob  ' is not supported.");
        assert_eq!(sh.run_line("ls a  b"), "usage: ls [path]");
    }

    #[test]
    fn whoami_unaffected_by_navigation() {
        let mut sh = shell();
        assert_eq!(sh.run_line("whoami"), "tester");
        sh.run_line("ls");
        sh.run_line("cd subdir");
        assert_eq!(sh.run_line("whoami"), "tester");
    }

    #[test]
    fn who_is_trimmed() {
        let mut sh = shell();
        assert_eq!(sh.run_line("who"), "tester pts/0");
    }

    #[test]
    fn exit_terminates() {
        let mut sh = shell();
        assert_eq!(sh.execute("exit").unwrap(), CommandOutput::Exit);
        assert_eq!(sh.state(), ShellState::Terminated);
        assert!(matches!(sh.execute("ls"), Err(ShellError::Terminated)));
    }

    #[test]
    fn sink_receives_rendered_results() {
        let sink = RecordingSink::default();
        let records = Rc::clone(&sink.0);
        let mut sh = shell().with_sink(Box::new(sink));
        sh.run_line("cd subdir");
        sh.run_line("   ");
        sh.run_line("uniq missing.txt");

        let records = records.borrow();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            ("cd subdir".to_string(), "Changed to directory: /subdir".to_string())
        );
        assert_eq!(records[1].1, "File 'missing.txt' does not exist.");
    }

    #[test]
    fn results_match_with_and_without_sink() {
        let mut plain = shell();
        let mut logged = shell().with_sink(Box::new(RecordingSink::default()));
        for line in ["ls", "cd subdir", "ls", "uniq file3.txt", "cd", "whoami"] {
            assert_eq!(plain.run_line(line), logged.run_line(line));
        }
    }

    #[test]
    fn script_runs_every_line_and_continues_past_errors() {
        let mut sh = shell();
        let steps = sh.run_script("ls\ncd nowhere  \n\ncd subdir\nls\nwhoami\ncd");
        let commands: Vec<&str> = steps.iter().map(|s| s.command.as_str()).collect();
        assert_eq!(
            commands,
            vec!["ls", "cd nowhere", "cd subdir", "ls", "whoami", "cd"]
        );
        assert_eq!(steps[1].output, "Directory 'nowhere' does not exist.");
        assert_eq!(steps[3].prompt, "test-host:/subdir$ ");
        assert_eq!(steps[3].output, "file3.txt");
        assert_eq!(sh.session().cwd(), "/");
    }

    #[test]
    fn script_stops_at_exit() {
        let mut sh = shell();
        let steps = sh.run_script("ls\nexit\nwhoami\n");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].output, FAREWELL);
        assert!(!sh.is_running());
    }
}
