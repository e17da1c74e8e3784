//! Behavioral specs for config handling.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// `-C` points at an explicit config file.
#[test]
fn explicit_config_flag_is_honored() {
    let project = Project::new();
    project.file(
        "configs/strict.toml",
        r#"
version = 1

[coverage]
collect = ["cov/*.json"]

[coverage.thresholds]
check = "error"
statements = 99
"#,
    );
    project.coverage_json("cov/unit.json", &[("src/a.js", 1, 2)]);

    project
        .cmd()
        .args(["-C", "configs/strict.toml", "check"])
        .assert()
        .code(1);
}

/// A malformed config file is a setup failure.
#[test]
fn malformed_config_exits_with_error() {
    let project = Project::new();
    project.config("version = [broken");

    project
        .cmd()
        .args(["check", "cov/*.json"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("invalid config"));
}

/// Config discovery walks up from the working directory.
#[test]
fn config_is_discovered_from_subdirectory() {
    let project = Project::new();
    project.config(
        r#"
version = 1

[coverage]
collect = ["*.json"]

[coverage.thresholds]
check = "error"
statements = 99
"#,
    );
    project.coverage_json("nested/cov.json", &[("src/a.js", 1, 2)]);

    let mut cmd = soak_cmd();
    cmd.current_dir(project.path().join("nested"));
    cmd.arg("check").assert().code(1);
}

/// Unknown config keys warn but do not fail the run.
#[test]
fn unknown_config_keys_warn() {
    let project = Project::new();
    project.config(
        r#"
version = 1

[coverage]
collect = ["cov/*.json"]
reprot = ["lcov"]
"#,
    );
    project.coverage_json("cov/unit.json", &[("src/a.js", 1, 1)]);

    project
        .cmd()
        .arg("check")
        .assert()
        .success()
        .stderr(predicates::str::contains("unknown key"));
}
