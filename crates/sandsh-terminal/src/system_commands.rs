//! Host and session commands: whoami, who, exit.

use sandsh_types::error::{Result, ShellError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

fn reject_args(cmd: &dyn Command, args: &[&str]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ShellError::Usage(cmd.usage().to_string()))
    }
}

// ---------------------------------------------------------------------------
// whoami
// ---------------------------------------------------------------------------

struct WhoamiCmd;
impl Command for WhoamiCmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn usage(&self) -> &str {
        "whoami"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        reject_args(self, args)?;
        let identity = env
            .identity
            .ok_or_else(|| ShellError::Platform("no identity service available".to_string()))?;
        Ok(CommandOutput::Text(identity.user_name()?))
    }
}

// ---------------------------------------------------------------------------
// who
// ---------------------------------------------------------------------------

struct WhoCmd;
impl Command for WhoCmd {
    fn name(&self) -> &str {
        "who"
    }
    fn usage(&self) -> &str {
        "who"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        reject_args(self, args)?;
        let sessions = env
            .sessions
            .ok_or_else(|| ShellError::Platform("no session service available".to_string()))?;
        Ok(CommandOutput::Text(sessions.sessions()?.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn usage(&self) -> &str {
        "exit"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        reject_args(self, args)?;
        Ok(CommandOutput::Exit)
    }
}

/// Register host and session commands.
pub fn register_system_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(WhoamiCmd));
    reg.register(Box::new(WhoCmd));
    reg.register(Box::new(ExitCmd));
}
