// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Threshold enforcement.
//!
//! Every file in the aggregate is checked against every configured metric
//! minimum. Enforcement is exhaustive: violations are collected across all
//! files and metrics so one failing build surfaces every offender at once.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::coverage::{CoverageMap, Metric, format_pct, summarize};

/// One metric of one file falling below its configured minimum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdViolation {
    pub file: String,
    pub metric: Metric,
    pub expected: f64,
    pub actual: f64,
}

impl std::fmt::Display for ThresholdViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "expected {} coverage to be at least {}% but was {}%\n\tat ({})",
            self.metric,
            format_pct(self.expected),
            format_pct(self.actual),
            self.file,
        )
    }
}

/// Result of one enforcement pass.
#[derive(Debug, Default)]
pub struct EnforceOutcome {
    pub violations: Vec<ThresholdViolation>,
    /// Configured metric names that are not recognized (warned, skipped).
    pub unknown_metrics: Vec<String>,
}

impl EnforceOutcome {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check every file against every configured minimum.
///
/// Unrecognized metric names produce one warning each and are skipped;
/// the recognized metrics are still evaluated. A violation occurs when the
/// summarized percentage is strictly below the minimum.
pub fn enforce(cov: &CoverageMap, thresholds: &BTreeMap<String, f64>) -> EnforceOutcome {
    let mut outcome = EnforceOutcome::default();

    let mut metrics = Vec::with_capacity(thresholds.len());
    for (name, min) in thresholds {
        match Metric::parse(name) {
            Some(metric) => metrics.push((metric, *min)),
            None => {
                tracing::warn!("unrecognized metric: {}", name);
                outcome.unknown_metrics.push(name.clone());
            }
        }
    }

    for (file, file_cov) in cov.iter() {
        let summary = summarize(file_cov);
        for (metric, min) in &metrics {
            let actual = summary.metric(*metric).pct;
            if actual < *min {
                outcome.violations.push(ThresholdViolation {
                    file: file.clone(),
                    metric: *metric,
                    expected: *min,
                    actual,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
#[path = "threshold_tests.rs"]
mod tests;
