//! sandsh entry point.
//!
//! Extracts the archive given by `--filesystem` into a sandbox directory,
//! runs the optional startup script, then reads commands from stdin until
//! `exit` or end of input. `--generate-files` writes sample fixtures instead.

mod cli;
mod fixtures;
mod repl;
mod setup;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.generate_files {
        let fixtures = fixtures::generate_files(Path::new("."))?;
        println!("Sample tree: {}", fixtures.tree.display());
        println!(
            "Created file system archive: {}",
            fixtures.archive.display()
        );
        println!("Created startup script: {}", fixtures.startup_script.display());
        return Ok(());
    }

    let config = cli.resolve_config()?;
    let archive = cli
        .filesystem
        .as_deref()
        .context("--filesystem is required")?;
    log::info!(
        "Starting sandsh as {} over {}",
        config.hostname,
        archive.display()
    );
    let mut shell = setup::build_shell(&config, archive)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(script) = &cli.startup_script {
        let source = std::fs::read_to_string(script)
            .with_context(|| format!("reading startup script {}", script.display()))?;
        for step in shell.run_script(&source) {
            repl::print_step(&mut out, &step)?;
        }
    }

    if shell.is_running() {
        let stdin = io::stdin();
        repl::run(&mut shell, &mut stdin.lock(), &mut out)?;
    }

    log::info!("sandsh shut down cleanly");
    Ok(())
}
