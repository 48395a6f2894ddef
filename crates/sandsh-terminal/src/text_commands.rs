//! Text processing commands: uniq.

use std::collections::HashSet;

use sandsh_types::error::{Result, ShellError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Keep the first occurrence of each distinct line, in input order.
///
/// Lines keep their terminators, so a final line without a newline is
/// distinct from the same text with one.
pub fn stable_dedup(text: &str) -> String {
    let mut seen = HashSet::new();
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if seen.insert(line) {
            out.push_str(line);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// uniq
// ---------------------------------------------------------------------------

struct UniqCmd;
impl Command for UniqCmd {
    fn name(&self) -> &str {
        "uniq"
    }
    fn usage(&self) -> &str {
        "uniq <file>"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let [file] = args else {
            return Err(ShellError::Usage(self.usage().to_string()));
        };
        let data = env.resolver.read_file(env.vfs, env.session.cwd(), file)?;
        let text = String::from_utf8_lossy(&data);
        Ok(CommandOutput::Text(stable_dedup(&text)))
    }
}

/// Register text processing commands.
pub fn register_text_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(UniqCmd));
}
