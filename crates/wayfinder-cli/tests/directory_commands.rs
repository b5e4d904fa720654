use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_map() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/hospital_map.json")
        .canonicalize()
        .expect("fixture map present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("wayfinder");
    cmd.env("RUST_LOG", "error").env("NO_COLOR", "1");
    cmd
}

fn with_fixture_map() -> Command {
    let mut cmd = cli();
    cmd.env_remove("WAYFINDER_MAP").arg("--map").arg(fixture_map());
    cmd
}

#[test]
fn floors_reports_components_and_isolated_nodes() {
    with_fixture_map()
        .arg("floors")
        .assert()
        .success()
        .stdout(predicate::str::contains("Riverside Clinic"))
        .stdout(predicate::str::contains(
            "Lobby (lobby): 4 locations, 2 connections, 2 component(s)",
        ))
        .stdout(predicate::str::contains("isolated: storage"));
}

#[test]
fn floors_json_is_an_array() {
    let output = with_fixture_map()
        .args(["--format", "json", "floors"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let floors = json.as_array().expect("array");
    assert_eq!(floors.len(), 2);
    assert_eq!(floors[1]["id"], "ward");
    assert_eq!(floors[1]["components"], 1);
}

#[test]
fn locations_can_be_limited_to_a_floor() {
    with_fixture_map()
        .args(["locations", "--floor", "ward"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Family Lounge"))
        .stdout(predicate::str::contains("Pharmacy").not());
}

#[test]
fn unknown_floor_fails() {
    with_fixture_map()
        .args(["locations", "--floor", "basement"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown floor: basement"));
}

#[test]
fn search_matches_room_labels() {
    with_fixture_map()
        .args(["search", "b-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ward Level:"))
        .stdout(predicate::str::contains("Ward B"));
}

#[test]
fn search_without_matches_says_so() {
    with_fixture_map()
        .args(["search", "radiology"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching locations."));
}

#[test]
fn starts_reports_nearest_origin() {
    with_fixture_map()
        .args(["starts", "--floor", "lobby", "--to", "pharmacy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main-entrance"))
        .stdout(predicate::str::contains(
            "Nearest starting point to pharmacy: Reception (reception)",
        ));
}

#[test]
fn bundled_sample_is_used_without_map_data() {
    let dir = tempdir().expect("temp dir");
    cli()
        .env_remove("WAYFINDER_MAP")
        .env("HOME", dir.path())
        .env("XDG_DATA_HOME", dir.path())
        .args(["route", "--from", "main-entrance", "--to", "emergency"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Arrive at Emergency Room (ER-001)"));
}
