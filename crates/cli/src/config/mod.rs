// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration model for soak.toml.
//!
//! Options mirror what the build-task driver passes in: which report
//! formats to render, where to put them, what to instrument, which
//! external coverage files to merge, and the thresholds to enforce.

pub mod defaults;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Top-level soak.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub coverage: CoverageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self { version: 1, coverage: CoverageConfig::default() }
    }
}

/// The `[coverage]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Turns the whole pipeline on or off.
    pub enable: bool,

    /// Report format identifiers rendered into the reporting directory.
    #[serde(default = "defaults::report_formats")]
    pub report: Vec<String>,

    /// Reporting directory, resolved against the working directory.
    #[serde(default = "defaults::save_path")]
    pub save_path: PathBuf,

    /// Which console reports to append after the file formats.
    pub print: PrintMode,

    /// Include globs for instrumentation.
    #[serde(default = "defaults::include_patterns")]
    pub includes: Vec<String>,

    /// Exclude globs for instrumentation. The vendored-dependency rule is
    /// always appended on top of these.
    pub excludes: Vec<String>,

    /// Globs of externally produced coverage files to merge in.
    pub collect: Option<Vec<String>>,

    /// Rewrite external file paths relative to the working directory
    /// before merging.
    pub relativize: bool,

    pub thresholds: ThresholdsConfig,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            enable: false,
            report: defaults::report_formats(),
            save_path: defaults::save_path(),
            print: PrintMode::default(),
            includes: defaults::include_patterns(),
            excludes: Vec::new(),
            collect: None,
            relativize: false,
            thresholds: ThresholdsConfig::default(),
        }
    }
}

/// Console output policy for the drain and the CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    /// No console reports and no progress diagnostics.
    None,
    /// Append the one-line aggregate summary.
    Summary,
    /// Append the per-file detail table.
    Detail,
    /// Append both console reports.
    #[default]
    Both,
}

/// Check level: error fails the build, warn only reports, off disables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckLevel {
    #[default]
    Error,
    Warn,
    Off,
}

/// The `[coverage.thresholds]` table: a check level plus one minimum
/// percentage per metric name.
///
/// Metric names are kept as written; unrecognized names surface as
/// configuration warnings at enforcement time rather than load failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    pub check: CheckLevel,

    #[serde(flatten)]
    pub min: BTreeMap<String, f64>,
}

impl ThresholdsConfig {
    pub fn is_empty(&self) -> bool {
        self.min.is_empty()
    }
}

/// Load a config file.
pub fn load(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

/// Load a config file, warning about unrecognized keys.
///
/// Typos in soak.toml should not silently disable thresholds, so every key
/// the model does not know is reported through `tracing::warn!`.
pub fn load_with_warnings(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let value: toml::Value = toml::from_str(&content)
        .with_context(|| format!("invalid config {}", path.display()))?;
    warn_unknown_keys(&value, path);

    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

const TOP_KEYS: &[&str] = &["version", "coverage"];
const COVERAGE_KEYS: &[&str] = &[
    "enable", "report", "save_path", "print", "includes", "excludes", "collect", "relativize",
    "thresholds",
];

fn warn_unknown_keys(value: &toml::Value, path: &Path) {
    let Some(table) = value.as_table() else { return };
    for key in table.keys() {
        if !TOP_KEYS.contains(&key.as_str()) {
            tracing::warn!("unknown key `{}` in {}", key, path.display());
        }
    }
    let Some(coverage) = table.get("coverage").and_then(|v| v.as_table()) else { return };
    for key in coverage.keys() {
        if !COVERAGE_KEYS.contains(&key.as_str()) {
            tracing::warn!("unknown key `coverage.{}` in {}", key, path.display());
        }
    }
}

/// Starter config written by `soak init`.
pub fn starter_toml() -> String {
    format!(
        "version = 1\n\n\
         [coverage]\n\
         enable = true\n\
         report = [\"{}\"]\n\
         save_path = \"{}\"\n\
         print = \"both\"\n\n\
         [coverage.thresholds]\n\
         check = \"error\"\n\
         statements = 80\n",
        defaults::DEFAULT_REPORT_FORMAT,
        defaults::SAVE_PATH,
    )
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
