// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Exit-time drain: persist, aggregate, report, enforce.
//!
//! The drain runs inside the terminal lifecycle hook of the process. No
//! event loop exists at that point, so everything here is strictly
//! synchronous: `std::fs` writes, in-memory aggregation, blocking console
//! output. Diagnostics go to stderr; stdout is reserved for console report
//! content and the test framework's own narration.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use termcolor::{ColorChoice, StandardStream};

use crate::collect::Collector;
use crate::config::{CheckLevel, CoverageConfig, PrintMode, defaults};
use crate::coverage::CoverageMap;
use crate::report::{ReportContext, render_all, reports_for};
use crate::threshold::{ThresholdViolation, enforce};

const BANNER: &str =
    "=============================================================================";

/// What the drain observed, for the caller to map to an exit code.
#[derive(Debug)]
pub enum DrainOutcome {
    /// The accumulator was empty: nothing persisted, nothing checked.
    /// A usability problem, not a build failure.
    NoCoverage,
    Completed {
        violations: Vec<ThresholdViolation>,
        report_failures: usize,
        warnings: Vec<String>,
    },
}

impl DrainOutcome {
    /// Whether the outcome should fail the build under the configured
    /// check level.
    pub fn is_build_failure(&self, check: CheckLevel) -> bool {
        match self {
            DrainOutcome::NoCoverage => false,
            DrainOutcome::Completed { violations, .. } => {
                check == CheckLevel::Error && !violations.is_empty()
            }
        }
    }
}

/// Register-once guard around the drain.
///
/// The terminal hook can be reached from more than one exit path; whichever
/// gets there first runs the drain, every later call is a no-op.
#[derive(Debug, Default)]
pub struct ExitDrain {
    fired: Cell<bool>,
}

impl ExitDrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    /// Run `body` unless the drain already fired.
    pub fn fire<F: FnOnce() -> DrainOutcome>(&self, body: F) -> Option<DrainOutcome> {
        if self.fired.replace(true) {
            return None;
        }
        Some(body())
    }
}

/// The drain sequence. `snapshot` is the accumulated in-process map,
/// `cwd` anchors collect patterns and path relativization.
pub fn run_drain(
    snapshot: CoverageMap,
    config: &CoverageConfig,
    reporting_dir: &Path,
    cwd: &Path,
) -> DrainOutcome {
    if snapshot.is_empty() {
        eprintln!("No coverage information was collected, exit without writing coverage information");
        return DrainOutcome::NoCoverage;
    }

    let chatty = config.print != PrintMode::None;
    let mut report_failures = 0usize;

    // Some test runners clean the directory the setup created; make it again.
    let dir_ok = match fs::create_dir_all(reporting_dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("soak: failed to create reporting directory {}: {e}", reporting_dir.display());
            false
        }
    };

    if dir_ok {
        let file = reporting_dir.join(defaults::RAW_COVERAGE_FILE);
        if chatty {
            eprintln!("{BANNER}");
            eprintln!("Writing coverage object [{}]", file.display());
        }
        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                if let Err(e) = fs::write(&file, json) {
                    eprintln!("soak: failed to write {}: {e}", file.display());
                    report_failures += 1;
                }
            }
            Err(e) => {
                eprintln!("soak: failed to serialize coverage: {e}");
                report_failures += 1;
            }
        }
    } else {
        report_failures += 1;
    }

    let mut collector = Collector::new();
    collector.add(&snapshot);
    if let Some(patterns) = &config.collect {
        collector.collect_external(patterns, config.relativize, cwd);
    }
    let (agg, warnings) = collector.into_parts();

    if chatty {
        eprintln!("Writing coverage reports at [{}]", reporting_dir.display());
        eprintln!("{BANNER}");
    }

    match reports_for(&config.report, config.print) {
        Ok(reports) => {
            let stdout = StandardStream::stdout(ColorChoice::Auto);
            let mut lock = stdout.lock();
            let mut ctx = ReportContext { dir: reporting_dir, out: &mut lock };
            report_failures += render_all(&reports, &agg, &mut ctx);
        }
        Err(e) => {
            // Formats were validated at setup; reaching this means the
            // config changed after install. Count every requested format.
            eprintln!("soak: {e}");
            report_failures += config.report.len();
        }
    }

    let mut violations = Vec::new();
    if config.thresholds.check != CheckLevel::Off && !config.thresholds.is_empty() {
        let outcome = enforce(&agg, &config.thresholds.min);
        for violation in &outcome.violations {
            eprintln!("{violation}");
        }
        violations = outcome.violations;
    }

    DrainOutcome::Completed { violations, report_failures, warnings }
}

#[cfg(test)]
#[path = "drain_tests.rs"]
mod tests;
