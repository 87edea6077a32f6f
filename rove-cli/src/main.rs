// SPDX-License-Identifier: AGPL-3.0-or-later
//! Rove CLI
//!
//! Drives one browser engine, either for a single command or from an interactive shell.

mod commands;
mod shell;

use clap::Parser;
use commands::{Action, Session};
use rove_core::RoveResult;
use rove_engine::{Engine, EngineConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "rove")]
#[command(author, version, about = "Rove - drives, folders, clipboard and pins", long_about = None)]
struct Cli {
    /// Command to run; starts the interactive shell when omitted
    #[command(subcommand)]
    command: Option<Action>,

    /// Configuration file (defaults to the per-user config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of the preference database
    #[arg(long, global = true)]
    prefs_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> RoveResult<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::load_default()?,
    };
    if let Some(dir) = &cli.prefs_dir {
        config.preferences_dir = Some(dir.clone());
    }
    Ok(config)
}

fn run(cli: Cli) -> RoveResult<()> {
    let config = load_config(&cli)?;
    let engine = Engine::open(&config)?;
    let mut session = Session::new(engine, cli.json);

    match cli.command {
        None | Some(Action::Shell) => shell::run(&mut session),
        Some(action) => session.run(action),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_shell_is_default() {
        let cli = Cli::try_parse_from(["rove", "--json"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rove", "ls", "/tmp", "--prefs-dir", "/var/rove", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.prefs_dir, Some(PathBuf::from("/var/rove")));
        assert!(matches!(cli.command, Some(Action::Ls { .. })));
    }
}
