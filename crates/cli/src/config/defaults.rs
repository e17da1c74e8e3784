// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! All default values are documented here for easy reference.
//! Config structs delegate to these via their `#[serde(default = ...)]`
//! attributes.

use std::path::PathBuf;

/// Default report format when none is configured.
pub const DEFAULT_REPORT_FORMAT: &str = "lcov";

/// Default reporting directory, relative to the working directory.
pub const SAVE_PATH: &str = "coverage";

/// Exclude rule for vendored dependency trees, always appended to the
/// configured excludes.
pub const VENDOR_EXCLUDE: &str = "**/node_modules/**";

/// Raw coverage artifact filename inside the reporting directory.
pub const RAW_COVERAGE_FILE: &str = "coverage.json";

pub fn report_formats() -> Vec<String> {
    vec![DEFAULT_REPORT_FORMAT.to_string()]
}

pub fn save_path() -> PathBuf {
    PathBuf::from(SAVE_PATH)
}

/// Instrumentation include globs.
pub fn include_patterns() -> Vec<String> {
    vec!["**/*.js".to_string()]
}
