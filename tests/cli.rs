#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli(travelog: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("sejour-cli").unwrap();
    cmd.arg("--travelog").arg(travelog);
    cmd
}

#[test]
fn add_then_status_roundtrip() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("travelog.json");

    cli(&log)
        .args([
            "add-trip",
            "--country",
            "FR",
            "--entry",
            "2025-01-01",
            "--exit",
            "2025-01-10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trip recorded"));

    cli(&log)
        .args(["status", "--date", "2025-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("used 10"))
        .stdout(predicate::str::contains("green"));
}

#[test]
fn status_exits_2_when_red() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("travelog.json");

    cli(&log)
        .args([
            "add-trip",
            "--country",
            "FR",
            "--entry",
            "2025-01-01",
            "--exit",
            "2025-03-30",
        ])
        .assert()
        .success();

    cli(&log)
        .args(["status", "--date", "2025-03-31"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("remaining 1"));
}

#[test]
fn overlapping_add_fails() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("travelog.json");

    cli(&log)
        .args([
            "add-trip",
            "--country",
            "FR",
            "--entry",
            "2025-01-01",
            "--exit",
            "2025-01-10",
        ])
        .assert()
        .success();

    cli(&log)
        .args([
            "add-trip",
            "--country",
            "DE",
            "--entry",
            "2025-01-05",
            "--exit",
            "2025-01-15",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("overlaps"));
}

#[test]
fn open_trip_requires_reason() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("travelog.json");

    cli(&log)
        .args(["add-trip", "--country", "FR", "--entry", "2025-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("override required"));

    cli(&log)
        .args([
            "add-trip",
            "--country",
            "FR",
            "--entry",
            "2025-01-01",
            "--reason",
            "mission en cours",
        ])
        .assert()
        .success();
}

#[test]
fn forecast_reports_would_be_usage() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("travelog.json");

    cli(&log)
        .args([
            "forecast",
            "--country",
            "ES",
            "--entry",
            "2025-04-01",
            "--exit",
            "2025-04-14",
            "--date",
            "2025-04-20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("used 14"));
}
