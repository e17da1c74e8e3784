// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Require-time instrumentation hook.
//!
//! The hook pairs a file matcher (include/exclude globs over the project
//! root) with a pluggable instrumenter. Matching files are rewritten on
//! first load so their execution increments counters in the run's
//! accumulator; everything else passes through untouched.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::config::defaults;
use crate::coverage::FileCoverage;
use crate::pipeline::SetupError;
use crate::run::Accumulator;

/// The external instrumentation capability.
///
/// Implementations rewrite `source` so that executing the result increments
/// statement/function/branch counters addressed under `coverage_var`, and
/// return the zeroed counter record with the static location metadata they
/// established. Instrumentation must be deterministic: the same source and
/// coverage variable always produce functionally equivalent counters.
pub trait Instrument {
    fn instrument(
        &self,
        path: &Path,
        source: &str,
        coverage_var: &str,
    ) -> Result<Instrumented, InstrumentError>;
}

/// Result of instrumenting one file.
pub struct Instrumented {
    /// The rewritten source.
    pub code: String,
    /// Zeroed counters plus static location metadata for the file.
    pub coverage: FileCoverage,
}

/// Instrumentation failure for a single file.
#[derive(Debug, thiserror::Error)]
#[error("failed to instrument {path}: {message}")]
pub struct InstrumentError {
    pub path: String,
    pub message: String,
}

impl InstrumentError {
    pub fn new(path: &Path, message: impl Into<String>) -> Self {
        Self { path: path.display().to_string(), message: message.into() }
    }
}

/// Hook configuration. Verbosity is the only knob; installing a hook has no
/// other side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookOptions {
    pub verbose: bool,
}

/// The set of files the hook instruments, resolved once at setup time.
///
/// Enumeration failure is fatal: a matcher that cannot see the tree would
/// silently produce an empty coverage run.
#[derive(Debug)]
pub struct FileMatcher {
    root: PathBuf,
    files: BTreeSet<PathBuf>,
}

impl FileMatcher {
    /// Enumerate files under `root` matching `includes` and not matching
    /// `excludes`. The vendored-dependency exclude is always appended.
    pub fn build(root: &Path, includes: &[String], excludes: &[String]) -> Result<Self, SetupError> {
        let include_set = build_glob_set(includes)?;

        let mut exclude_patterns: Vec<String> = excludes.to_vec();
        exclude_patterns.push(defaults::VENDOR_EXCLUDE.to_string());
        let exclude_set = build_glob_set(&exclude_patterns)?;

        let mut files = BTreeSet::new();
        for entry in WalkBuilder::new(root).follow_links(false).build() {
            let entry = entry.map_err(|source| SetupError::Walk { root: root.to_path_buf(), source })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if include_set.is_match(rel) && !exclude_set.is_match(rel) {
                files.insert(entry.path().to_path_buf());
            }
        }

        Ok(Self { root: root.to_path_buf(), files })
    }

    /// Whether `path` (absolute, or relative to the matcher root) is in the
    /// instrumented set.
    pub fn matches(&self, path: &Path) -> bool {
        if path.is_absolute() {
            self.files.contains(path)
        } else {
            self.files.contains(&self.root.join(path))
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The matched files, in sorted order.
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, SetupError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|source| SetupError::Pattern { pattern: pattern.clone(), source })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|source| SetupError::Pattern { pattern: patterns.join(", "), source })
}

/// The installed source transform.
pub struct SourceHook {
    matcher: FileMatcher,
    instrumenter: Box<dyn Instrument>,
    accumulator: Accumulator,
    coverage_var: String,
    verbose: bool,
}

impl SourceHook {
    pub fn new(
        matcher: FileMatcher,
        instrumenter: Box<dyn Instrument>,
        accumulator: Accumulator,
        coverage_var: impl Into<String>,
        opts: HookOptions,
    ) -> Self {
        Self {
            matcher,
            instrumenter,
            accumulator,
            coverage_var: coverage_var.into(),
            verbose: opts.verbose,
        }
    }

    pub fn matcher(&self) -> &FileMatcher {
        &self.matcher
    }

    /// Transform `source` if `path` is in the instrumented set.
    ///
    /// Returns `None` for non-matching files. Source that already carries
    /// this run's coverage variable is returned unchanged, which makes the
    /// transform idempotent per coverage-variable name. On first
    /// instrumentation the file's zeroed counters are registered with the
    /// accumulator.
    pub fn transform(&self, path: &Path, source: &str) -> Result<Option<String>, InstrumentError> {
        if !self.matcher.matches(path) {
            return Ok(None);
        }
        if source.contains(&self.coverage_var) {
            return Ok(Some(source.to_string()));
        }

        let instrumented = self.instrumenter.instrument(path, source, &self.coverage_var)?;
        self.accumulator.register(instrumented.coverage);
        if self.verbose {
            eprintln!("soak: instrumented {}", path.display());
        }
        Ok(Some(instrumented.code))
    }
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;
