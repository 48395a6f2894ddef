//! Built-in navigation commands and registration.

use sandsh_types::error::{Result, ShellError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};
use crate::system_commands::register_system_commands;
use crate::text_commands::register_text_commands;

/// Separator placed between names in `ls` output.
const LS_SEPARATOR: &str = "  ";

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(CdCmd));
    register_system_commands(reg);
    register_text_commands(reg);
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn usage(&self) -> &str {
        "ls [path]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.len() > 1 {
            return Err(ShellError::Usage(self.usage().to_string()));
        }
        let names = env
            .resolver
            .list(env.vfs, env.session.cwd(), args.first().copied())?;
        Ok(CommandOutput::Text(names.join(LS_SEPARATOR)))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn usage(&self) -> &str {
        "cd [path]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let target = match args {
            [] => "/",
            [path] => *path,
            _ => return Err(ShellError::Usage(self.usage().to_string())),
        };
        let next = env.resolver.navigate(env.vfs, env.session.cwd(), target)?;
        env.session.set_cwd(next);
        Ok(CommandOutput::Text(format!(
            "Changed to directory: {}",
            env.session.cwd()
        )))
    }
}
