//! End-to-end CLI tests: snapshot in, report rows out.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn cadence_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cadence"));
    cmd.current_dir(dir);
    cmd.env("CADENCE_LOG", "error");
    cmd
}

fn write_fixture(dir: &Path) {
    std::fs::write(
        dir.join("cadence.toml"),
        r#"
[boards.deliverables]
board_id = 42
start_column = "col1"
end_column = "col3"
"#,
    )
    .expect("write config");

    std::fs::write(
        dir.join("board.json"),
        r#"{
          "boards": [
            {
              "id": 42,
              "name": "Team Deliverables",
              "columns": [
                {"name": "col1", "id": 1},
                {"name": "col2", "id": 2},
                {"name": "col3", "id": 3}
              ]
            }
          ],
          "issues": [
            {
              "owner": "acme",
              "repo_name": "api",
              "number": 7,
              "title": "Fix login timeout",
              "labels": [],
              "events": [
                {"kind": "ADDED_TO_PROJECT", "created_at": "2020-01-01T00:00:00Z", "project_id": 42, "column_name": "col1"},
                {"kind": "MOVED_COLUMNS_IN_PROJECT", "created_at": "2020-01-03T00:00:00Z", "column_name": "col2"},
                {"kind": "MOVED_COLUMNS_IN_PROJECT", "created_at": "2020-01-05T00:00:00Z", "column_name": "col3"}
              ]
            }
          ]
        }"#,
    )
    .expect("write snapshot");
}

fn report_args(metric: &str) -> Vec<&str> {
    vec![
        metric,
        "deliverables",
        "--snapshot",
        "board.json",
        "--year",
        "2020",
        "--month",
        "1",
    ]
}

#[test]
fn columns_csv_matches_daily_grid() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let output = cadence_cmd(dir.path())
        .args(report_args("columns"))
        .output()
        .expect("columns should not crash");
    assert!(
        output.status.success(),
        "columns failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 32); // header + 31 days of January
    assert_eq!(lines[0], "Day,col1,col2,col3");
    assert_eq!(lines[1], "2020-01-01,1,0,0");
    assert_eq!(lines[2], "2020-01-02,1,0,0");
    assert_eq!(lines[3], "2020-01-03,0,1,0");
    assert_eq!(lines[4], "2020-01-04,0,1,0");
    assert_eq!(lines[5], "2020-01-05,0,0,1");
    for line in &lines[6..] {
        assert!(line.ends_with(",0,0,0"), "expected zero row, got {line}");
    }
}

#[test]
fn issues_csv_has_one_row_per_finished_item() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    cadence_cmd(dir.path())
        .args(report_args("issues"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Card #,Team,Type,Description,col1,col2,col3,Development Days,Feature?,Blocked?,Blocked Days",
        ))
        .stdout(predicate::str::contains(
            "7,api,Enhancement,Fix login timeout,01/01/20,01/03/20,01/05/20,4.0,false,false,0",
        ));
}

#[test]
fn no_headers_drops_the_header_row() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let mut args = report_args("columns");
    args.push("--no-headers");
    cadence_cmd(dir.path())
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Day,").not())
        .stdout(predicate::str::starts_with("2020-01-01,1,0,0"));
}

#[test]
fn json_mode_emits_the_report_document() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let mut args = report_args("issues");
    args.push("--json");
    let output = cadence_cmd(dir.path())
        .args(args)
        .output()
        .expect("issues should not crash");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON report");
    assert_eq!(report["name"], "Team_Deliverables_issues_2020-01.csv");
    assert_eq!(report["rows"][0][0], "7");
    assert_eq!(report["rows"][0][7], "4.0");
}

#[test]
fn output_flag_writes_a_file() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let mut args = report_args("columns");
    args.extend(["--output", "occupancy.csv"]);
    cadence_cmd(dir.path())
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote to: occupancy.csv"));

    let written = std::fs::read_to_string(dir.path().join("occupancy.csv")).unwrap();
    assert!(written.starts_with("Day,col1,col2,col3\n"));
    assert!(written.contains("2020-01-05,0,0,1"));
}

#[test]
fn unknown_board_fails_with_a_clear_error() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    cadence_cmd(dir.path())
        .args([
            "issues",
            "mystery",
            "--snapshot",
            "board.json",
            "--year",
            "2020",
            "--month",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no project board found"));
}

#[test]
fn missing_snapshot_fails() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    cadence_cmd(dir.path())
        .args([
            "columns",
            "deliverables",
            "--snapshot",
            "nope.json",
            "--year",
            "2020",
            "--month",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading snapshot"));
}
