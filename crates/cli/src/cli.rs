//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::color::ColorMode;
use crate::config::PrintMode;

/// Coverage aggregation and threshold enforcement for JavaScript test runs
#[derive(Parser)]
#[command(name = "soak")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "SOAK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate coverage files and write reports
    Report(ReportArgs),
    /// Aggregate coverage files and enforce thresholds
    Check(CheckArgs),
    /// Initialize soak configuration
    Init(InitArgs),
}

#[derive(clap::Args)]
pub struct ReportArgs {
    /// Coverage file globs to aggregate (overrides `coverage.collect`)
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Reporting directory
    #[arg(long, value_name = "DIR")]
    pub save_path: Option<PathBuf>,

    /// Report format to write (repeatable)
    #[arg(long = "report", value_name = "FORMAT")]
    pub report: Vec<String>,

    /// Console reports to print
    #[arg(long, value_name = "MODE")]
    pub print: Option<PrintMode>,

    /// Rewrite coverage paths relative to the working directory
    #[arg(long)]
    pub relativize: bool,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Disable color output (shorthand for --color=never)
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Coverage file globs to aggregate (overrides `coverage.collect`)
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Rewrite coverage paths relative to the working directory
    #[arg(long)]
    pub relativize: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Overwrite existing config
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
