// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report command implementation.
//!
//! Aggregates external coverage files, writes the configured report
//! formats under the reporting directory, prints console reports per the
//! print mode, and enforces thresholds. The exit code reflects the
//! threshold outcome.

use anyhow::Context;
use termcolor::StandardStream;

use soak::cli::{Cli, ReportArgs};
use soak::collect::Collector;
use soak::color::resolve_color;
use soak::config::{CheckLevel, CoverageConfig};
use soak::report::{ReportContext, render_all, reports_for};
use soak::threshold::enforce;
use soak::verbose::VerboseLogger;

/// Run the report command.
pub fn run(cli: &Cli, args: &ReportArgs) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir()?;
    let (config, config_path) = crate::load_config(cli, &cwd)?;

    let mut coverage = config.coverage;
    if let Some(path) = &args.save_path {
        coverage.save_path = path.clone();
    }
    if !args.report.is_empty() {
        coverage.report = args.report.clone();
    }
    if let Some(print) = args.print {
        coverage.print = print;
    }
    if args.relativize {
        coverage.relativize = true;
    }

    let patterns = resolve_patterns(&args.patterns, &coverage)?;

    let verbose = VerboseLogger::new(args.verbose);
    if verbose.is_enabled() {
        verbose.section("Configuration");
        match &config_path {
            Some(path) => verbose.log(&format!("Config: {}", path.display())),
            None => verbose.log("Config: (defaults)"),
        }
        verbose.patterns("coverage.collect", &patterns);
        verbose.log(&format!("Reporting directory: {}", coverage.save_path.display()));
    }

    let mut collector = Collector::new();
    collector.collect_external(&patterns, coverage.relativize, &cwd);
    if collector.is_empty() {
        eprintln!("No coverage information was collected, exit without writing coverage information");
        return Ok(0);
    }
    let (agg, warnings) = collector.into_parts();
    if verbose.is_enabled() {
        verbose.section("Aggregation");
        verbose.log(&format!("{} file(s), {} warning(s)", agg.len(), warnings.len()));
    }

    let reporting_dir = cwd.join(&coverage.save_path);
    std::fs::create_dir_all(&reporting_dir).with_context(|| {
        format!("failed to create reporting directory {}", reporting_dir.display())
    })?;

    let reports = reports_for(&coverage.report, coverage.print)?;
    let stdout = StandardStream::stdout(resolve_color(args.color, args.no_color));
    let mut lock = stdout.lock();
    let mut ctx = ReportContext { dir: &reporting_dir, out: &mut lock };
    render_all(&reports, &agg, &mut ctx);

    if coverage.thresholds.check != CheckLevel::Off && !coverage.thresholds.is_empty() {
        let outcome = enforce(&agg, &coverage.thresholds.min);
        for violation in &outcome.violations {
            eprintln!("{violation}");
        }
        if !outcome.is_clean() && coverage.thresholds.check == CheckLevel::Error {
            return Ok(1);
        }
    }
    Ok(0)
}

/// CLI patterns win; otherwise the configured collect set. Neither is a
/// configuration error: the command has nothing to aggregate.
pub(crate) fn resolve_patterns(
    cli_patterns: &[String],
    coverage: &CoverageConfig,
) -> anyhow::Result<Vec<String>> {
    if !cli_patterns.is_empty() {
        return Ok(cli_patterns.to_vec());
    }
    coverage.collect.clone().ok_or_else(|| {
        anyhow::anyhow!("no coverage inputs: pass PATTERN arguments or set coverage.collect in soak.toml")
    })
}
