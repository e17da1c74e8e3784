// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.
//!
//! Aggregates external coverage files and enforces thresholds without
//! writing any report artifacts.

use soak::cli::{CheckArgs, Cli};
use soak::collect::Collector;
use soak::config::CheckLevel;
use soak::threshold::enforce;
use soak::verbose::VerboseLogger;

use crate::cmd_report::resolve_patterns;

/// Run the check command.
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir()?;
    let (config, _config_path) = crate::load_config(cli, &cwd)?;

    let mut coverage = config.coverage;
    if args.relativize {
        coverage.relativize = true;
    }
    let patterns = resolve_patterns(&args.patterns, &coverage)?;

    let verbose = VerboseLogger::new(args.verbose);
    verbose.patterns("coverage.collect", &patterns);

    let mut collector = Collector::new();
    collector.collect_external(&patterns, coverage.relativize, &cwd);
    if collector.is_empty() {
        eprintln!("No coverage information was collected, exit without writing coverage information");
        return Ok(0);
    }
    let (agg, _warnings) = collector.into_parts();

    if coverage.thresholds.check == CheckLevel::Off || coverage.thresholds.is_empty() {
        eprintln!("no thresholds configured, nothing to check");
        return Ok(0);
    }

    let outcome = enforce(&agg, &coverage.thresholds.min);
    for violation in &outcome.violations {
        eprintln!("{violation}");
    }
    if outcome.is_clean() {
        eprintln!("coverage thresholds met for {} file(s)", agg.len());
        return Ok(0);
    }
    eprintln!("{} threshold violation(s)", outcome.violations.len());
    Ok(i32::from(coverage.thresholds.check == CheckLevel::Error))
}
