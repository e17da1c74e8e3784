// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text-summary format report output: one aggregate line per metric.

use std::io::Write;

use termcolor::WriteColor;

use crate::color::pct_spec;
use crate::coverage::{CoverageMap, Metric, format_pct, summarize_map};

use super::{Report, ReportContext};

/// Aggregate one-liner-per-metric summary written to the console writer.
#[derive(Debug)]
pub struct TextSummaryReport;

const BANNER_WIDTH: usize = 80;

impl Report for TextSummaryReport {
    fn name(&self) -> &'static str {
        "text-summary"
    }

    fn render(&self, cov: &CoverageMap, ctx: &mut ReportContext<'_>) -> anyhow::Result<()> {
        let totals = summarize_map(cov);
        let out = &mut *ctx.out;

        writeln!(out, "{}", banner(" Coverage summary "))?;
        for metric in Metric::ALL {
            let summary = totals.metric(metric);
            let label = capitalize(metric.name());
            write!(out, "{label:<12} : ")?;
            out.set_color(&pct_spec(summary.pct))?;
            write!(out, "{}%", format_pct(summary.pct))?;
            out.reset()?;
            writeln!(out, " ( {}/{} )", summary.covered, summary.total)?;
        }
        writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
        Ok(())
    }
}

fn banner(title: &str) -> String {
    let pad = BANNER_WIDTH.saturating_sub(title.len());
    let left = pad / 2;
    format!("{}{}{}", "=".repeat(left), title, "=".repeat(pad - left))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "text_summary_tests.rs"]
mod tests;
