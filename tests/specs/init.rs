//! Behavioral specs for `soak init`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

#[test]
fn init_writes_starter_config() {
    let dir = tempfile::TempDir::new().unwrap();

    soak_cmd().current_dir(dir.path()).arg("init").assert().success();

    let config = std::fs::read_to_string(dir.path().join("soak.toml")).unwrap();
    assert!(config.contains("[coverage]"));
    assert!(config.contains("[coverage.thresholds]"));
}

#[test]
fn init_refuses_to_overwrite() {
    let project = Project::new();

    project
        .cmd()
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let project = Project::new();

    project.cmd().args(["init", "--force"]).assert().success();

    let config = std::fs::read_to_string(project.path().join("soak.toml")).unwrap();
    assert!(config.contains("[coverage]"));
}
