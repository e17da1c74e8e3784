//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for setting up throwaway projects with coverage
//! files and invoking the soak binary against them.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)] // helpers are shared across spec modules

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Returns a Command configured to run the soak binary.
pub fn soak_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("soak"));
    // Keep specs hermetic from the invoking shell.
    cmd.env_remove("SOAK_CONFIG");
    cmd.env_remove("SOAK_DEBUG");
    cmd.env_remove("SOAK_LOG");
    cmd
}

/// A throwaway project directory with a soak.toml.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("soak.toml"), "version = 1\n").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Replace the project's soak.toml.
    pub fn config(&self, content: &str) {
        fs::write(self.dir.path().join("soak.toml"), content).unwrap();
    }

    /// Write a file, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Write an istanbul-style coverage file. Each entry is
    /// `(source path, covered statements, total statements)`.
    pub fn coverage_json(&self, rel: &str, entries: &[(&str, u32, u32)]) {
        self.file(rel, &coverage_map_json(entries).to_string());
    }

    /// A soak command running inside this project.
    pub fn cmd(&self) -> Command {
        let mut cmd = soak_cmd();
        cmd.current_dir(self.dir.path());
        cmd
    }
}

/// Build the JSON value for a coverage map, one statement per line.
pub fn coverage_map_json(entries: &[(&str, u32, u32)]) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (path, covered, total) in entries {
        let mut statement_map = serde_json::Map::new();
        let mut s = serde_json::Map::new();
        for id in 0..*total {
            statement_map.insert(
                id.to_string(),
                serde_json::json!({
                    "start": {"line": id + 1, "column": 0},
                    "end": {"line": id + 1, "column": 20},
                }),
            );
            s.insert(id.to_string(), serde_json::json!(u32::from(id < *covered)));
        }
        map.insert(
            (*path).to_string(),
            serde_json::json!({
                "path": path,
                "statementMap": statement_map,
                "fnMap": {},
                "branchMap": {},
                "s": s,
                "f": {},
                "b": {},
            }),
        );
    }
    serde_json::Value::Object(map)
}

/// Path to a static fixture directory.
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}
