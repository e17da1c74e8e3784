//! soak binary entry point: dispatch and exit-code mapping.

mod cmd_check;
mod cmd_init;
mod cmd_report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use soak::cli::{Cli, Command};
use soak::config::Config;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Command::Report(args)) => cmd_report::run(&cli, args),
        Some(Command::Check(args)) => cmd_check::run(&cli, args),
        Some(Command::Init(args)) => cmd_init::run(args),
        // clap shows help when no subcommand is given.
        None => Ok(2),
    };

    match result {
        Ok(code) => ExitCode::from(code.clamp(0, u8::MAX as i32) as u8),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Diagnostics go to stderr; filter with SOAK_LOG (default: warn).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("SOAK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load config from the explicit flag, discovery, or defaults.
pub(crate) fn load_config(cli: &Cli, cwd: &Path) -> anyhow::Result<(Config, Option<PathBuf>)> {
    match &cli.config {
        Some(path) => Ok((soak::config::load_with_warnings(path)?, Some(path.clone()))),
        None => match soak::discovery::find_config(cwd) {
            Some(path) => {
                let config = soak::config::load_with_warnings(&path)?;
                Ok((config, Some(path)))
            }
            None => Ok((Config::default(), None)),
        },
    }
}
