//! Behavioral specs for `soak report`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// Aggregating coverage files writes the default lcov artifact under the
/// reporting directory.
#[test]
fn report_writes_lcov_artifact() {
    let project = Project::new();
    project.coverage_json("cov/unit.json", &[("src/a.js", 1, 2)]);

    project
        .cmd()
        .args(["report", "cov/*.json", "--print", "none"])
        .assert()
        .success();

    let lcov = std::fs::read_to_string(project.path().join("coverage/lcov.info")).unwrap();
    assert!(lcov.contains("SF:src/a.js"));
    assert!(lcov.contains("end_of_record"));
}

/// `--save-path` overrides the reporting directory.
#[test]
fn report_honors_save_path_override() {
    let project = Project::new();
    project.coverage_json("cov/unit.json", &[("src/a.js", 1, 1)]);

    project
        .cmd()
        .args(["report", "cov/*.json", "--save-path", "build/cov", "--print", "none"])
        .assert()
        .success();

    assert!(project.path().join("build/cov/lcov.info").exists());
}

/// Two external files covering disjoint file sets aggregate to the union.
#[test]
fn report_aggregates_disjoint_external_files() {
    let project = Project::new();
    project.coverage_json("cov/unit.json", &[("src/a.js", 1, 1)]);
    project.coverage_json("cov/e2e.json", &[("src/b.js", 1, 1)]);

    project
        .cmd()
        .args(["report", "cov/*.json", "--report", "json", "--print", "none"])
        .assert()
        .success();

    let agg = std::fs::read_to_string(project.path().join("coverage/coverage-final.json")).unwrap();
    assert!(agg.contains("src/a.js"));
    assert!(agg.contains("src/b.js"));
}

/// Console summary goes to stdout, diagnostics to stderr.
#[test]
fn report_print_summary_writes_to_stdout() {
    let project = Project::new();
    project.coverage_json("cov/unit.json", &[("src/a.js", 3, 4)]);

    project
        .cmd()
        .args(["report", "cov/*.json", "--print", "summary", "--no-color"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Coverage summary"))
        .stdout(predicates::str::contains("Statements   : 75% ( 3/4 )"));
}

/// `--print none` suppresses console report content.
#[test]
fn report_print_none_keeps_stdout_empty() {
    let project = Project::new();
    project.coverage_json("cov/unit.json", &[("src/a.js", 1, 1)]);

    project
        .cmd()
        .args(["report", "cov/*.json", "--print", "none"])
        .assert()
        .success()
        .stdout(predicates::str::is_empty());
}

/// A threshold violation at error level fails the command.
#[test]
fn report_fails_on_error_level_violation() {
    let project = Project::new();
    project.config(
        r#"
version = 1

[coverage.thresholds]
check = "error"
statements = 80
"#,
    );
    // 3/4 = 75%, below 80.
    project.coverage_json("cov/unit.json", &[("src/low.js", 3, 4)]);

    project
        .cmd()
        .args(["report", "cov/*.json", "--print", "none"])
        .assert()
        .code(1)
        .stderr(predicates::str::contains(
            "expected statements coverage to be at least 80% but was 75%",
        ))
        .stderr(predicates::str::contains("src/low.js"));
}

/// check = "warn" reports the violation but passes.
#[test]
fn report_warn_level_reports_but_passes() {
    let project = Project::new();
    project.config(
        r#"
version = 1

[coverage.thresholds]
check = "warn"
statements = 99
"#,
    );
    project.coverage_json("cov/unit.json", &[("src/low.js", 1, 2)]);

    project
        .cmd()
        .args(["report", "cov/*.json", "--print", "none"])
        .assert()
        .success()
        .stderr(predicates::str::contains("expected statements coverage"));
}

/// Violations are reported exhaustively: a passing file does not hide the
/// failing one, and every offending file is named.
#[test]
fn report_lists_every_offending_file() {
    let project = Project::new();
    project.config(
        r#"
version = 1

[coverage.thresholds]
check = "error"
statements = 80
"#,
    );
    project.coverage_json(
        "cov/unit.json",
        &[("src/low.js", 3, 4), ("src/high.js", 9, 10), ("src/worse.js", 0, 4)],
    );

    project
        .cmd()
        .args(["report", "cov/*.json", "--print", "none"])
        .assert()
        .code(1)
        .stderr(predicates::str::contains("src/low.js"))
        .stderr(predicates::str::contains("src/worse.js"))
        .stderr(predicates::str::contains("src/high.js").not());
}

/// `--relativize` rewrites absolute coverage paths before merge, so an
/// absolute-path worker file and a relative in-process style file land on
/// one key.
#[test]
fn report_relativize_rewrites_absolute_paths() {
    let project = Project::new();
    let abs = project.path().join("src/a.js").display().to_string();
    project.coverage_json("cov/worker.json", &[(&abs, 1, 2)]);
    project.coverage_json("cov/unit.json", &[("src/a.js", 1, 2)]);

    project
        .cmd()
        .args(["report", "cov/*.json", "--relativize", "--report", "json", "--print", "none"])
        .assert()
        .success();

    let agg: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(project.path().join("coverage/coverage-final.json")).unwrap(),
    )
    .unwrap();
    let keys: Vec<&String> = agg.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["src/a.js"]);
    // Counts merged under the single key: 1 + 1 executions of statement 0.
    assert_eq!(agg["src/a.js"]["s"]["0"], 2);
}

/// Patterns that match nothing are a usability problem, not a failure.
#[test]
fn report_with_no_matches_exits_zero() {
    let project = Project::new();

    project
        .cmd()
        .args(["report", "cov/*.json", "--print", "none"])
        .assert()
        .success()
        .stderr(predicates::str::contains("No coverage information was collected"));
}

/// No patterns and no configured collect set is a configuration error.
#[test]
fn report_without_inputs_is_an_error() {
    let project = Project::new();

    project
        .cmd()
        .args(["report", "--print", "none"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("no coverage inputs"));
}

/// An unknown report format aborts before anything is written.
#[test]
fn report_rejects_unknown_format() {
    let project = Project::new();
    project.coverage_json("cov/unit.json", &[("src/a.js", 1, 1)]);

    project
        .cmd()
        .args(["report", "cov/*.json", "--report", "cobertura", "--print", "none"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unknown report format"));
}

/// A malformed coverage file is skipped with a warning; the rest of the
/// inputs still aggregate.
#[test]
fn report_isolates_malformed_inputs() {
    let project = Project::new();
    project.file("cov/broken.json", "not json at all");
    project.coverage_json("cov/unit.json", &[("src/a.js", 1, 1)]);

    project
        .cmd()
        .args(["report", "cov/*.json", "--print", "none"])
        .assert()
        .success()
        .stderr(predicates::str::contains("broken.json"));

    assert!(project.path().join("coverage/lcov.info").exists());
}

/// Collect patterns can come from soak.toml instead of the command line.
#[test]
fn report_uses_configured_collect_patterns() {
    let project = Project::new();
    project.config(
        r#"
version = 1

[coverage]
collect = ["cov/*.json"]
"#,
    );
    project.coverage_json("cov/unit.json", &[("src/a.js", 1, 1)]);

    project
        .cmd()
        .args(["report", "--print", "none"])
        .assert()
        .success();

    assert!(project.path().join("coverage/lcov.info").exists());
}
