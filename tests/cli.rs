mod common;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("nexus-equity").unwrap()
}

fn sample_dir() -> (TempDir, String) {
    let dir = TempDir::new().expect("create temp dir");
    let path = common::write_sample_csv(dir.path());
    let path = path.to_str().expect("utf8 path").to_string();
    (dir, path)
}

#[test]
fn states_lists_every_state() {
    let (_dir, data) = sample_dir();
    cmd()
        .args(["--data", &data, "states"])
        .assert()
        .success()
        .stdout(contains("Andhra Pradesh"))
        .stdout(contains("Assam"))
        .stdout(contains("Punjab"))
        .stdout(contains("Rajasthan"));
}

#[test]
fn summary_prints_state_means() {
    let (_dir, data) = sample_dir();
    cmd()
        .args(["--data", &data, "summary", "--state", "Punjab"])
        .assert()
        .success()
        .stdout(contains("Districts: 2"))
        .stdout(contains("Mean DEI: 64.0"));
}

#[test]
fn profile_prints_status_and_recommendation() {
    let (_dir, data) = sample_dir();
    cmd()
        .args([
            "--data", &data, "profile", "--state", "Punjab", "--district", "Ludhiana",
        ])
        .assert()
        .success()
        .stdout(contains("Status: Stability Risk"))
        .stdout(contains("audit"));
}

#[test]
fn districts_lists_a_state_sorted() {
    let (_dir, data) = sample_dir();
    let out = cmd()
        .args(["--data", &data, "districts", "--state", "Andhra Pradesh"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(out).unwrap();
    let anantapur = text.find("Anantapur").expect("Anantapur listed");
    let chittoor = text.find("Chittoor").expect("Chittoor listed");
    assert!(anantapur < chittoor);
}

#[test]
fn overview_reports_extremes_and_notes() {
    let (_dir, data) = sample_dir();
    cmd()
        .args(["--data", &data, "overview", "--state", "Punjab"])
        .assert()
        .success()
        .stdout(contains("Best performer: Amritsar"))
        .stdout(contains("Needs most attention: Ludhiana"))
        .stdout(contains("stability risk"));
}

#[test]
fn unknown_state_exits_nonzero() {
    let (_dir, data) = sample_dir();
    cmd()
        .args(["--data", &data, "summary", "--state", "Goa"])
        .assert()
        .failure()
        .stderr(contains("unknown state"));
}

#[test]
fn missing_data_file_exits_nonzero() {
    cmd()
        .args(["--data", "no_such_file.csv", "states"])
        .assert()
        .failure()
        .stderr(contains("file not found"));
}

#[test]
fn json_profile_is_machine_readable() {
    let (_dir, data) = sample_dir();
    let out = cmd()
        .args([
            "--data",
            &data,
            "--json",
            "profile",
            "--state",
            "Andhra Pradesh",
            "--district",
            "Anantapur",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: Value = serde_json::from_slice(&out).expect("valid json output");
    assert_eq!(v["ok"], true);
    assert_eq!(v["data"]["category"], "AccessStress");
    assert_eq!(v["data"]["record"]["district"], "Anantapur");
}

#[test]
fn worst_ranks_lowest_dei_first() {
    let (_dir, data) = sample_dir();
    let out = cmd()
        .args(["--data", &data, "worst", "--limit", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(out).unwrap();
    let first = text.lines().next().unwrap_or_default();
    assert!(first.contains("Barpeta"), "got: {first}");
}
