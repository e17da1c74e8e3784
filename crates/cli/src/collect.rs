// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Collector: merges the in-process coverage map with externally produced
//! coverage files into one aggregate.
//!
//! External files (typically written by parallel worker processes) are
//! read-only inputs. Each file is isolated: a malformed or unreadable one
//! is reported as a configuration warning and skipped, and the remaining
//! files still merge. Path relativization happens before merge because map
//! keys are path strings; merging an absolute-path entry with a relative
//! one for the same file would otherwise produce two keys.

use std::path::{Component, Path, PathBuf};

use globset::Glob;
use ignore::WalkBuilder;

use crate::coverage::CoverageMap;
use crate::file_reader::FileContent;

/// Accumulates coverage maps into one aggregate, additive per path key.
#[derive(Debug, Default)]
pub struct Collector {
    agg: CoverageMap,
    warnings: Vec<String>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a coverage map into the aggregate. Metadata conflicts follow
    /// the first-wins policy and are recorded as warnings.
    pub fn add(&mut self, map: &CoverageMap) {
        for path in self.agg.merge(map) {
            self.warn(format!("conflicting coverage metadata for {path}, keeping first"));
        }
    }

    /// Expand each glob pattern against `cwd` (in the order given, files
    /// sorted within a pattern), parse every match as a coverage map, and
    /// merge. With `relativize`, entry paths are rewritten relative to
    /// `cwd` first.
    pub fn collect_external(&mut self, patterns: &[String], relativize: bool, cwd: &Path) {
        for pattern in patterns {
            let files = match expand_pattern(pattern, cwd) {
                Ok(files) => files,
                Err(message) => {
                    self.warn(message);
                    continue;
                }
            };
            for file in files {
                match load_coverage_file(&file) {
                    Ok(mut map) => {
                        if relativize {
                            map = relativize_map(map, cwd);
                        }
                        self.add(&map);
                    }
                    Err(message) => self.warn(message),
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.agg.is_empty()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The aggregate and the configuration warnings gathered on the way.
    pub fn into_parts(self) -> (CoverageMap, Vec<String>) {
        (self.agg, self.warnings)
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Files under `cwd` matching `pattern`, sorted.
fn expand_pattern(pattern: &str, cwd: &Path) -> Result<Vec<PathBuf>, String> {
    let glob = Glob::new(pattern)
        .map_err(|e| format!("invalid collect pattern `{pattern}`: {e}"))?
        .compile_matcher();

    let mut files = Vec::new();
    for entry in WalkBuilder::new(cwd).follow_links(false).build().flatten() {
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let rel = entry.path().strip_prefix(cwd).unwrap_or(entry.path());
        if glob.is_match(rel) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn load_coverage_file(path: &Path) -> Result<CoverageMap, String> {
    let content = FileContent::read(path)
        .map_err(|e| format!("failed to read coverage file {}: {e}", path.display()))?;
    let text = content
        .as_str()
        .ok_or_else(|| format!("coverage file {} is not valid UTF-8", path.display()))?;
    serde_json::from_str(text)
        .map_err(|e| format!("failed to parse coverage file {}: {e}", path.display()))
}

/// Rewrite every entry's recorded path (and its key) relative to `cwd`.
fn relativize_map(map: CoverageMap, cwd: &Path) -> CoverageMap {
    map.iter()
        .map(|(_, cov)| {
            let mut cov = cov.clone();
            let path = Path::new(&cov.path);
            if path.is_absolute() {
                cov.path = relative_to(cwd, path).display().to_string();
            }
            cov
        })
        .collect()
}

/// Relative path from `base` to `path`, walking up with `..` where the two
/// diverge. Both inputs are expected to be absolute.
pub fn relative_to(base: &Path, path: &Path) -> PathBuf {
    let base_parts: Vec<Component> = base.components().collect();
    let path_parts: Vec<Component> = path.components().collect();

    let shared = base_parts
        .iter()
        .zip(path_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in shared..base_parts.len() {
        rel.push("..");
    }
    for part in &path_parts[shared..] {
        rel.push(part.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}

#[cfg(test)]
#[path = "collect_tests.rs"]
mod tests;
