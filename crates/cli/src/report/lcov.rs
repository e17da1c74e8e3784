// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! LCOV format report output.
//!
//! Writes `lcov.info` into the reporting directory, one record per file:
//!
//! ```text
//! TN:
//! SF:<source file>
//! FN:<line>,<function name>
//! FNDA:<execution count>,<function name>
//! FNF:<functions found>
//! FNH:<functions hit>
//! BRDA:<line>,<block>,<arm>,<execution count>
//! BRF:<arms found>
//! BRH:<arms hit>
//! DA:<line>,<execution count>
//! LF:<lines found>
//! LH:<lines hit>
//! end_of_record
//! ```

use anyhow::Context;

use crate::coverage::CoverageMap;

use super::{Report, ReportContext};

/// LCOV format report generator (the default format).
#[derive(Debug)]
pub struct LcovReport;

const LCOV_FILE: &str = "lcov.info";

impl Report for LcovReport {
    fn name(&self) -> &'static str {
        "lcov"
    }

    fn render(&self, cov: &CoverageMap, ctx: &mut ReportContext<'_>) -> anyhow::Result<()> {
        let path = ctx.dir.join(LCOV_FILE);
        std::fs::write(&path, format_lcov(cov))
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

fn format_lcov(cov: &CoverageMap) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for (path, file) in cov.iter() {
        out.push_str("TN:\n");
        let _ = writeln!(out, "SF:{path}");

        let mut functions_hit = 0usize;
        for (id, meta) in &file.fn_map {
            let count = file.f.get(id).copied().unwrap_or(0);
            let _ = writeln!(out, "FN:{},{}", meta.line, meta.name);
            let _ = writeln!(out, "FNDA:{},{}", count, meta.name);
            if count > 0 {
                functions_hit += 1;
            }
        }
        let _ = writeln!(out, "FNF:{}", file.fn_map.len());
        let _ = writeln!(out, "FNH:{functions_hit}");

        let mut arms_found = 0usize;
        let mut arms_hit = 0usize;
        for (id, meta) in &file.branch_map {
            let counts = file.b.get(id);
            for arm in 0..meta.locations.len() {
                let count = counts.and_then(|c| c.get(arm)).copied().unwrap_or(0);
                let _ = writeln!(out, "BRDA:{},{},{},{}", meta.line, id, arm, count);
                arms_found += 1;
                if count > 0 {
                    arms_hit += 1;
                }
            }
        }
        let _ = writeln!(out, "BRF:{arms_found}");
        let _ = writeln!(out, "BRH:{arms_hit}");

        let lines = file.line_hits();
        let mut lines_hit = 0usize;
        for (line, count) in &lines {
            let _ = writeln!(out, "DA:{line},{count}");
            if *count > 0 {
                lines_hit += 1;
            }
        }
        let _ = writeln!(out, "LF:{}", lines.len());
        let _ = writeln!(out, "LH:{lines_hit}");

        out.push_str("end_of_record\n");
    }
    out
}

#[cfg(test)]
#[path = "lcov_tests.rs"]
mod tests;
