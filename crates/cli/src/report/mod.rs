// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report generators.
//!
//! A generator renders the aggregated coverage data either into the
//! reporting directory (file formats) or to the console writer (console
//! formats). Generators are independent: one failing never prevents the
//! others from running, and nothing downstream depends on a concrete
//! format: dispatch is by string identifier.

mod json;
mod lcov;
mod text;
mod text_summary;

use std::path::Path;

use termcolor::WriteColor;

use crate::config::PrintMode;
use crate::coverage::CoverageMap;
use crate::pipeline::SetupError;

pub use json::JsonReport;
pub use lcov::LcovReport;
pub use text::TextReport;
pub use text_summary::TextSummaryReport;

/// Where a generator may write: the reporting directory for file formats,
/// the console writer for console formats.
pub struct ReportContext<'a> {
    pub dir: &'a Path,
    pub out: &'a mut dyn WriteColor,
}

/// A single report generator.
pub trait Report: std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn render(&self, cov: &CoverageMap, ctx: &mut ReportContext<'_>) -> anyhow::Result<()>;
}

/// Look up a generator by its format identifier.
pub fn create_report(name: &str) -> Option<Box<dyn Report>> {
    match name {
        "lcov" => Some(Box::new(LcovReport)),
        "json" => Some(Box::new(JsonReport)),
        "text" => Some(Box::new(TextReport)),
        "text-summary" => Some(Box::new(TextSummaryReport)),
        _ => None,
    }
}

/// Resolve the configured formats plus the console generators selected by
/// `print`. An unknown format is a fatal setup error: it would otherwise
/// silently drop a requested artifact.
pub fn reports_for(formats: &[String], print: PrintMode) -> Result<Vec<Box<dyn Report>>, SetupError> {
    let mut reports = Vec::with_capacity(formats.len() + 2);
    for format in formats {
        let report =
            create_report(format).ok_or_else(|| SetupError::UnknownReport(format.clone()))?;
        reports.push(report);
    }
    match print {
        PrintMode::None => {}
        PrintMode::Summary => reports.push(Box::new(TextSummaryReport)),
        PrintMode::Detail => reports.push(Box::new(TextReport)),
        PrintMode::Both => {
            reports.push(Box::new(TextReport));
            reports.push(Box::new(TextSummaryReport));
        }
    }
    Ok(reports)
}

/// Render every generator, isolating failures. Returns the failure count;
/// each failure is reported on stderr.
pub fn render_all(
    reports: &[Box<dyn Report>],
    cov: &CoverageMap,
    ctx: &mut ReportContext<'_>,
) -> usize {
    let mut failures = 0;
    for report in reports {
        if let Err(e) = report.render(cov, ctx) {
            eprintln!("soak: {} report failed: {:#}", report.name(), e);
            failures += 1;
        }
    }
    failures
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
