//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::coverage::{BranchMeta, FileCoverage, FnMeta, Loc, Range};

/// Creates a temp directory with a minimal soak.toml.
pub fn temp_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("soak.toml"), "version = 1\n").unwrap();
    dir
}

/// Creates a temp directory with custom config content.
pub fn temp_project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("soak.toml"), config).unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

fn stmt_range(line: u32) -> Range {
    Range { start: Loc { line, column: 0 }, end: Loc { line, column: 20 } }
}

/// A coverage record with `statements` zero-count statements (one per line,
/// ids from 0), one function, and one two-arm branch.
pub fn sample_coverage(path: &str, statements: u32) -> FileCoverage {
    let mut cov = FileCoverage::new(path);
    for id in 0..statements {
        cov.statement_map.insert(id, stmt_range(id + 1));
        cov.s.insert(id, 0);
    }
    cov.fn_map.insert(0, FnMeta { name: "run".to_string(), line: 1, loc: stmt_range(1) });
    cov.f.insert(0, 0);
    cov.branch_map.insert(
        0,
        BranchMeta { line: 1, kind: "if".to_string(), locations: vec![stmt_range(1), stmt_range(1)] },
    );
    cov.b.insert(0, vec![0, 0]);
    cov
}

/// Like [`sample_coverage`] but with the first `covered` statements (and the
/// function, and one branch arm) marked executed once.
pub fn covered_coverage(path: &str, covered: u32, total: u32) -> FileCoverage {
    let mut cov = sample_coverage(path, total);
    for id in 0..covered.min(total) {
        cov.hit_statement(id);
    }
    if covered > 0 {
        cov.hit_function(0);
        cov.hit_branch(0, 0);
    }
    cov
}
