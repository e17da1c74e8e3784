// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON format report output.
//!
//! Writes the aggregated coverage map to `coverage-final.json` in the
//! reporting directory. Unlike the raw `coverage.json` artifact (the
//! in-process counters, persisted verbatim by the drain), this file
//! carries the post-aggregation view including merged external inputs.

use anyhow::Context;

use crate::coverage::CoverageMap;

use super::{Report, ReportContext};

/// JSON format report generator.
#[derive(Debug)]
pub struct JsonReport;

const JSON_FILE: &str = "coverage-final.json";

impl Report for JsonReport {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, cov: &CoverageMap, ctx: &mut ReportContext<'_>) -> anyhow::Result<()> {
        let path = ctx.dir.join(JSON_FILE);
        let content = serde_json::to_string_pretty(cov)?;
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
