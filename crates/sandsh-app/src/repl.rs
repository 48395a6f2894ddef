//! Line-oriented front-end over stdin/stdout.

use std::io::{self, BufRead, Write};

use sandsh_terminal::{ScriptStep, Shell};

/// Print a script step the way an interactive command would have appeared.
pub fn print_step(out: &mut impl Write, step: &ScriptStep) -> io::Result<()> {
    writeln!(out, "{}{}", step.prompt, step.command)?;
    if !step.output.is_empty() {
        writeln!(out, "{}", step.output)?;
    }
    Ok(())
}

/// Prompt, read, execute, print, until end of input or `exit`.
pub fn run(shell: &mut Shell, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
    let mut line = String::new();
    while shell.is_running() {
        write!(out, "{}", shell.prompt())?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let command = line.trim_end_matches(['\r', '\n']);
        if command.trim().is_empty() {
            continue;
        }

        let output = shell.run_line(command);
        if !output.is_empty() {
            writeln!(out, "{output}")?;
        }
    }
    Ok(())
}
