// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text format report output: the per-file detail table.

use std::io::Write;

use termcolor::WriteColor;

use crate::color::{pct_spec, scheme};
use crate::coverage::{CoverageMap, FileSummary, format_pct, summarize, summarize_map};

use super::{Report, ReportContext};

/// Per-file detail table written to the console writer.
#[derive(Debug)]
pub struct TextReport;

const METRIC_COLUMNS: [&str; 4] = ["% Stmts", "% Branch", "% Funcs", "% Lines"];
const PCT_WIDTH: usize = 8;

impl Report for TextReport {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&self, cov: &CoverageMap, ctx: &mut ReportContext<'_>) -> anyhow::Result<()> {
        let name_width = cov
            .files()
            .map(|f| f.len() + 1)
            .chain(std::iter::once("All files".len()))
            .max()
            .unwrap_or(0)
            + 1;

        let out = &mut *ctx.out;
        write_rule(out, name_width)?;

        out.set_color(&scheme::header())?;
        write!(out, "{:<name_width$}", "File")?;
        out.reset()?;
        for column in METRIC_COLUMNS {
            write!(out, "|{column:>PCT_WIDTH$} ")?;
        }
        writeln!(out, "|")?;
        write_rule(out, name_width)?;

        write_row(out, "All files", &summarize_map(cov), name_width, false)?;
        for (path, file) in cov.iter() {
            let label = format!(" {path}");
            write_row(out, &label, &summarize(file), name_width, true)?;
        }

        write_rule(out, name_width)?;
        Ok(())
    }
}

fn write_rule(out: &mut dyn WriteColor, name_width: usize) -> std::io::Result<()> {
    write!(out, "{}", "-".repeat(name_width))?;
    for _ in METRIC_COLUMNS {
        write!(out, "|{}", "-".repeat(PCT_WIDTH + 1))?;
    }
    writeln!(out, "|")
}

fn write_row(
    out: &mut dyn WriteColor,
    label: &str,
    summary: &FileSummary,
    name_width: usize,
    is_path: bool,
) -> std::io::Result<()> {
    if is_path {
        out.set_color(&scheme::path())?;
    }
    write!(out, "{label:<name_width$}")?;
    out.reset()?;

    let pcts = [
        summary.statements.pct,
        summary.branches.pct,
        summary.functions.pct,
        summary.lines.pct,
    ];
    for pct in pcts {
        write!(out, "|")?;
        out.set_color(&pct_spec(pct))?;
        write!(out, "{:>PCT_WIDTH$}", format_pct(pct))?;
        out.reset()?;
        write!(out, " ")?;
    }
    writeln!(out, "|")
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
