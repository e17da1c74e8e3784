// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Metric summaries derived from raw coverage counters.
//!
//! Summaries are computed on demand and never persisted independently of
//! the raw coverage map.

use serde::Serialize;

use super::map::{CoverageMap, FileCoverage};

/// The four coverage metrics thresholds can be set on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Statements,
    Branches,
    Functions,
    Lines,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Statements, Metric::Branches, Metric::Functions, Metric::Lines];

    /// Parse a configured metric name; `None` marks it unrecognized.
    pub fn parse(name: &str) -> Option<Metric> {
        match name {
            "statements" => Some(Metric::Statements),
            "branches" => Some(Metric::Branches),
            "functions" => Some(Metric::Functions),
            "lines" => Some(Metric::Lines),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::Statements => "statements",
            Metric::Branches => "branches",
            Metric::Functions => "functions",
            Metric::Lines => "lines",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `{covered, total, pct}` for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub covered: u64,
    pub total: u64,
    pub pct: f64,
}

impl MetricSummary {
    pub fn from_counts(covered: u64, total: u64) -> Self {
        Self { covered, total, pct: percent(covered, total) }
    }

    /// Fold another summary's counts in and recompute the percentage.
    pub fn add(&mut self, other: MetricSummary) {
        self.covered += other.covered;
        self.total += other.total;
        self.pct = percent(self.covered, self.total);
    }
}

impl Default for MetricSummary {
    fn default() -> Self {
        Self::from_counts(0, 0)
    }
}

/// Percentage covered, rounded to two decimals. A metric with nothing to
/// cover summarizes to 100%.
fn percent(covered: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let pct = covered as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Render a percentage the way the console reports print it: integral
/// values without a fraction, everything else with two decimals.
pub fn format_pct(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{}", pct as u64)
    } else {
        let fixed = format!("{:.2}", pct);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Per-file summary across all four metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FileSummary {
    pub statements: MetricSummary,
    pub branches: MetricSummary,
    pub functions: MetricSummary,
    pub lines: MetricSummary,
}

impl FileSummary {
    pub fn metric(&self, metric: Metric) -> MetricSummary {
        match metric {
            Metric::Statements => self.statements,
            Metric::Branches => self.branches,
            Metric::Functions => self.functions,
            Metric::Lines => self.lines,
        }
    }

    /// Fold another file's counts into this summary.
    pub fn add(&mut self, other: &FileSummary) {
        self.statements.add(other.statements);
        self.branches.add(other.branches);
        self.functions.add(other.functions);
        self.lines.add(other.lines);
    }
}

/// Summarize one file's counters.
pub fn summarize(cov: &FileCoverage) -> FileSummary {
    let statements = MetricSummary::from_counts(
        cov.s.values().filter(|&&c| c > 0).count() as u64,
        cov.s.len() as u64,
    );
    let functions = MetricSummary::from_counts(
        cov.f.values().filter(|&&c| c > 0).count() as u64,
        cov.f.len() as u64,
    );

    let mut arm_total = 0u64;
    let mut arm_covered = 0u64;
    for arms in cov.b.values() {
        arm_total += arms.len() as u64;
        arm_covered += arms.iter().filter(|&&c| c > 0).count() as u64;
    }
    let branches = MetricSummary::from_counts(arm_covered, arm_total);

    let line_hits = cov.line_hits();
    let lines = MetricSummary::from_counts(
        line_hits.values().filter(|&&c| c > 0).count() as u64,
        line_hits.len() as u64,
    );

    FileSummary { statements, branches, functions, lines }
}

/// Summarize a whole map: counts are summed across files, then percentages
/// recomputed from the totals.
pub fn summarize_map(map: &CoverageMap) -> FileSummary {
    let mut totals = FileSummary::default();
    for (_, cov) in map.iter() {
        totals.add(&summarize(cov));
    }
    totals
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
