//! `hire`: ask coding agents from the command line.
//!
//! `claude`, `codex` and `gemini` run as local subprocesses, `grok` is called
//! over the xAI HTTP API. Conversations are stored as JSON sessions under the
//! data directory (`~/.hire` or `$HIRE_HOME`).

pub mod adapters;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod files;
pub mod logging;
pub mod paths;

use std::process::ExitCode;

use anyhow::Result;

use crate::adapters::DefaultAdapters;
use crate::cli::{Cli, Command};
use crate::commands::{Context, Io};
use crate::paths::HirePaths;

/// Runs one parsed command line against the real environment.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let ctx = Context::load(HirePaths::from_env()?);
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let mut io = Io {
        stdin: &mut stdin,
        stdout: &mut stdout,
        stderr: &mut stderr,
    };
    let success = dispatch(&ctx, &cli.command, &DefaultAdapters, &mut io)?;
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Routes a subcommand and reports whether it succeeded. Split from [`run`]
/// so tests can inject adapters and capture output.
pub fn dispatch(
    ctx: &Context,
    command: &Command,
    adapters: &dyn adapters::AdapterFactory,
    io: &mut Io<'_>,
) -> Result<bool> {
    match command {
        Command::Ask(args) => commands::ask::run(ctx, args, adapters, io)?,
        Command::Sessions(args) => commands::sessions::run(ctx, args, io)?,
        Command::Show(args) => commands::show::run(ctx, args, io)?,
        Command::Delete(args) => commands::delete::run(ctx, args, io)?,
        Command::Doctor => return commands::doctor::run(ctx, io),
    }
    Ok(true)
}
