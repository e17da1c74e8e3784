// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-file execution counters and their static location metadata.
//!
//! The serialized form is the istanbul `coverage.json` object layout
//! (`path`, `statementMap`, `fnMap`, `branchMap`, `s`, `f`, `b`) so the
//! persisted artifact interoperates with the wider coverage tool ecosystem.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A position in a source file (1-based line, 0-based column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loc {
    pub line: u32,
    pub column: u32,
}

/// A half-open source range from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Loc,
    pub end: Loc,
}

/// Static metadata for one instrumented function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FnMeta {
    pub name: String,
    pub line: u32,
    pub loc: Range,
}

/// Static metadata for one instrumented branch point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchMeta {
    pub line: u32,
    /// Branch kind as reported by the instrumenter (`if`, `switch`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// One location per branch arm.
    pub locations: Vec<Range>,
}

/// Execution counters for one file plus the location metadata established
/// at instrumentation time.
///
/// Counts only ever increase; the maps of static metadata are immutable
/// once the file is registered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCoverage {
    pub path: String,

    #[serde(rename = "statementMap")]
    pub statement_map: BTreeMap<u32, Range>,
    #[serde(rename = "fnMap")]
    pub fn_map: BTreeMap<u32, FnMeta>,
    #[serde(rename = "branchMap")]
    pub branch_map: BTreeMap<u32, BranchMeta>,

    /// Statement execution counts, keyed by statement id.
    pub s: BTreeMap<u32, u64>,
    /// Function execution counts, keyed by function id.
    pub f: BTreeMap<u32, u64>,
    /// Branch arm execution counts, keyed by branch id.
    pub b: BTreeMap<u32, Vec<u64>>,
}

impl FileCoverage {
    /// Create an empty coverage record for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    /// Record one execution of statement `id`.
    pub fn hit_statement(&mut self, id: u32) {
        let count = self.s.entry(id).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Record one execution of function `id`.
    pub fn hit_function(&mut self, id: u32) {
        let count = self.f.entry(id).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Record one execution of arm `arm` of branch `id`.
    pub fn hit_branch(&mut self, id: u32, arm: usize) {
        let arms = self.b.entry(id).or_default();
        if arms.len() <= arm {
            arms.resize(arm + 1, 0);
        }
        arms[arm] = arms[arm].saturating_add(1);
    }

    /// Derived line counts: each statement contributes its start line, and
    /// a line's count is the maximum count of the statements starting on it.
    pub fn line_hits(&self) -> BTreeMap<u32, u64> {
        let mut lines = BTreeMap::new();
        for (id, range) in &self.statement_map {
            let count = self.s.get(id).copied().unwrap_or(0);
            let entry = lines.entry(range.start.line).or_insert(0);
            if count > *entry {
                *entry = count;
            }
        }
        lines
    }

    /// Whether `other` carries the same static metadata as `self`.
    pub fn same_shape(&self, other: &FileCoverage) -> bool {
        self.statement_map == other.statement_map
            && self.fn_map == other.fn_map
            && self.branch_map == other.branch_map
    }

    /// Merge `other`'s counters into `self`.
    ///
    /// When the static metadata agrees, counts are summed per identifier.
    /// When it disagrees, `self`'s metadata wins: counts are summed only for
    /// identifiers `self` knows, the rest are dropped, and `true` is returned
    /// so the caller can surface a configuration warning.
    pub fn merge(&mut self, other: &FileCoverage) -> bool {
        let conflict = !self.same_shape(other);

        for (id, count) in &other.s {
            if conflict && !self.statement_map.contains_key(id) {
                continue;
            }
            let entry = self.s.entry(*id).or_insert(0);
            *entry = entry.saturating_add(*count);
        }
        for (id, count) in &other.f {
            if conflict && !self.fn_map.contains_key(id) {
                continue;
            }
            let entry = self.f.entry(*id).or_insert(0);
            *entry = entry.saturating_add(*count);
        }
        for (id, arms) in &other.b {
            if conflict && !self.branch_map.contains_key(id) {
                continue;
            }
            let mine = self.b.entry(*id).or_default();
            if mine.len() < arms.len() {
                mine.resize(arms.len(), 0);
            }
            for (slot, count) in mine.iter_mut().zip(arms.iter()) {
                *slot = slot.saturating_add(*count);
            }
        }

        conflict
    }
}

/// Mapping from file path to its coverage record. Keys are unique; insertion
/// order is irrelevant (entries are kept sorted by path).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverageMap(BTreeMap<String, FileCoverage>);

impl CoverageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, path: &str) -> Option<&FileCoverage> {
        self.0.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut FileCoverage> {
        self.0.get_mut(path)
    }

    /// Insert `cov` under its own path, replacing any existing entry.
    pub fn insert(&mut self, cov: FileCoverage) {
        self.0.insert(cov.path.clone(), cov);
    }

    /// Insert `cov` only if its path is not yet present.
    ///
    /// Used when a file is re-instrumented: registering is idempotent and
    /// never resets counters that already accumulated.
    pub fn register(&mut self, cov: FileCoverage) {
        self.0.entry(cov.path.clone()).or_insert(cov);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FileCoverage)> {
        self.0.iter()
    }

    /// All file paths in the map, in sorted order.
    pub fn files(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Merge every entry of `other` into `self`, additive per path key.
    ///
    /// Returns the paths whose static metadata conflicted (the first-merged
    /// entry's metadata was kept for those).
    pub fn merge(&mut self, other: &CoverageMap) -> Vec<String> {
        let mut conflicts = Vec::new();
        for (path, cov) in &other.0 {
            match self.0.get_mut(path) {
                Some(existing) => {
                    if existing.merge(cov) {
                        conflicts.push(path.clone());
                    }
                }
                None => {
                    self.0.insert(path.clone(), cov.clone());
                }
            }
        }
        conflicts
    }
}

impl FromIterator<FileCoverage> for CoverageMap {
    fn from_iter<I: IntoIterator<Item = FileCoverage>>(iter: I) -> Self {
        let mut map = CoverageMap::new();
        for cov in iter {
            map.insert(cov);
        }
        map
    }
}

#[cfg(test)]
#[path = "map_tests.rs"]
mod tests;
