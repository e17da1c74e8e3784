//! Behavioral specs for `soak check`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

fn threshold_config(check: &str) -> String {
    format!(
        r#"
version = 1

[coverage]
collect = ["cov/*.json"]

[coverage.thresholds]
check = "{check}"
statements = 80
"#
    )
}

/// An error-level violation fails the build with exit code 1.
#[test]
fn check_fails_on_error_level_violation() {
    let project = Project::new();
    project.config(&threshold_config("error"));
    project.coverage_json("cov/unit.json", &[("src/low.js", 3, 4)]);

    project
        .cmd()
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicates::str::contains("src/low.js"))
        .stderr(predicates::str::contains("threshold violation"));
}

/// A warn-level violation is reported but passes.
#[test]
fn check_warn_level_reports_but_passes() {
    let project = Project::new();
    project.config(&threshold_config("warn"));
    project.coverage_json("cov/unit.json", &[("src/low.js", 3, 4)]);

    project
        .cmd()
        .arg("check")
        .assert()
        .success()
        .stderr(predicates::str::contains("expected statements coverage"));
}

/// check = "off" skips enforcement entirely.
#[test]
fn check_off_skips_enforcement() {
    let project = Project::new();
    project.config(&threshold_config("off"));
    project.coverage_json("cov/unit.json", &[("src/low.js", 0, 4)]);

    project
        .cmd()
        .arg("check")
        .assert()
        .success()
        .stderr(predicates::str::contains("nothing to check"));
}

/// Meeting every threshold exits 0 and says so.
#[test]
fn check_passes_when_thresholds_met() {
    let project = Project::new();
    project.config(&threshold_config("error"));
    project.coverage_json("cov/unit.json", &[("src/a.js", 9, 10)]);

    project
        .cmd()
        .arg("check")
        .assert()
        .success()
        .stderr(predicates::str::contains("coverage thresholds met"));
}

/// An unrecognized metric name warns but the recognized metrics still
/// enforce.
#[test]
fn check_warns_on_unrecognized_metric() {
    let project = Project::new();
    project.config(
        r#"
version = 1

[coverage]
collect = ["cov/*.json"]

[coverage.thresholds]
check = "error"
statement = 80
lines = 80
"#,
    );
    project.coverage_json("cov/unit.json", &[("src/low.js", 1, 4)]);

    project
        .cmd()
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicates::str::contains("unrecognized metric: statement"))
        .stderr(predicates::str::contains("expected lines coverage"));
}

/// Positional patterns override the configured collect set.
#[test]
fn check_patterns_override_config() {
    let project = Project::new();
    project.config(&threshold_config("error"));
    project.coverage_json("cov/unit.json", &[("src/low.js", 0, 4)]);
    project.coverage_json("other/good.json", &[("src/a.js", 4, 4)]);

    project
        .cmd()
        .args(["check", "other/*.json"])
        .assert()
        .success();
}

/// The static aggregate fixture: two worker files, thresholds in config.
#[test]
fn check_runs_against_fixture_project() {
    soak_cmd()
        .current_dir(fixture("aggregate"))
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicates::str::contains("src/parser.js"));
}
