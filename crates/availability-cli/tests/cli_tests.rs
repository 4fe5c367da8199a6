//! Integration tests for the `availability` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the slots,
//! holiday and book subcommands through the actual binary, including stdin
//! input, file I/O and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// A fixed clock before every date in the fixture.
const NOW: &str = "2026-01-01T08:00";

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn schedule_path() -> String {
    fixture("schedule.json")
}

/// Run a subcommand against the fixture schedule and parse stdout as JSON.
fn run_json(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("availability")
        .unwrap()
        .args(args)
        .args(["-i", &schedule_path(), "--now", NOW])
        .output()
        .expect("binary must run");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// slots subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slots_on_business_day_skip_booked_time() {
    let json = run_json(&["slots", "--date", "2026-03-16"]);
    let times: Vec<&str> = json["times"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();

    assert_eq!(times.len(), 14);
    assert_eq!(times[0], "09:00");
    assert!(!times.contains(&"10:00"));
    assert!(!times.contains(&"10:30"));
    assert!(times.contains(&"11:00"));
    assert_eq!(json["sourceKind"], "BusinessHours");
    assert_eq!(json["isOpenOverride"], false);
}

#[test]
fn slots_respect_slot_minutes() {
    let json = run_json(&["slots", "--date", "2026-03-17", "--slot-minutes", "120"]);
    assert_eq!(
        json["times"],
        serde_json::json!(["09:00", "11:00", "13:00", "15:00"])
    );
    assert_eq!(json["slotMinutes"], 120);
}

#[test]
fn slots_clamp_tiny_slot_size() {
    let json = run_json(&["slots", "--date", "2026-03-17", "--slot-minutes", "1"]);
    assert_eq!(json["slotMinutes"], 5);
    assert_eq!(json["times"].as_array().unwrap().len(), 96);
}

#[test]
fn closed_special_day_reports_label() {
    let json = run_json(&["slots", "--date", "2025-12-25"]);
    assert_eq!(json["times"], serde_json::json!([]));
    assert_eq!(json["sourceKind"], "SpecialDay");
    assert_eq!(json["holidayLabel"], "Christmas");
    assert_eq!(json["isOpenOverride"], true);
}

#[test]
fn early_closing_special_day_uses_its_window() {
    let json = run_json(&["slots", "--date", "2025-12-24", "--slot-minutes", "60"]);
    assert_eq!(
        json["times"],
        serde_json::json!(["09:00", "10:00", "11:00", "12:00"])
    );
    assert_eq!(json["holidayComment"], "Closing early");
}

#[test]
fn wraparound_holiday_defers_to_business_hours() {
    // 2025-12-29 is a Monday inside the Dec 26 - Jan 2 range.
    let json = run_json(&["slots", "--date", "2025-12-29", "--slot-minutes", "240"]);
    assert_eq!(json["times"], serde_json::json!(["09:00", "13:00"]));
    assert_eq!(json["sourceKind"], "Holiday");
    assert_eq!(json["holidayLabel"], "Winter hours");
}

#[test]
fn same_day_now_truncates_slots() {
    Command::cargo_bin("availability")
        .unwrap()
        .args(["slots", "--date", "2026-03-17", "--slot-minutes", "60"])
        .args(["-i", &schedule_path(), "--now", "2026-03-17T14:32"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"15:00\""))
        .stdout(predicate::str::contains("\"16:00\""))
        .stdout(predicate::str::contains("\"14:00\"").not());
}

#[test]
fn schedule_can_come_from_stdin() {
    let schedule = std::fs::read_to_string(schedule_path()).unwrap();
    Command::cargo_bin("availability")
        .unwrap()
        .args(["slots", "--date", "2026-03-22", "--now", NOW])
        .write_stdin(schedule)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"times\": []"));
}

#[test]
fn malformed_date_fails() {
    Command::cargo_bin("availability")
        .unwrap()
        .args(["slots", "--date", "03/16/2026"])
        .args(["-i", &schedule_path(), "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn non_integer_slot_minutes_fails() {
    Command::cargo_bin("availability")
        .unwrap()
        .args(["slots", "--date", "2026-03-16", "--slot-minutes", "half"])
        .args(["-i", &schedule_path(), "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("slotMinutes"));
}

#[test]
fn unknown_timezone_fails() {
    Command::cargo_bin("availability")
        .unwrap()
        .args(["slots", "--date", "2026-03-16", "--tz", "Mars/Olympus"])
        .args(["-i", &schedule_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown timezone"));
}

#[test]
fn output_can_be_written_to_file() {
    let output_path = std::env::temp_dir().join("availability-cli-test-output.json");
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("availability")
        .unwrap()
        .args(["slots", "--date", "2026-03-16"])
        .args(["-i", &schedule_path(), "--now", NOW])
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["date"], "2026-03-16");

    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// holiday subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn holiday_lookup_finds_wraparound_rule() {
    let json = run_json(&["holiday", "--date", "2026-01-01"]);
    assert_eq!(json["exists"], true);
    assert_eq!(json["holiday"], "Winter hours");
    assert_eq!(json["is_open"], true);
}

#[test]
fn holiday_lookup_without_match() {
    let json = run_json(&["holiday", "--date", "2026-03-16"]);
    assert_eq!(json, serde_json::json!({ "exists": false }));
}

// ─────────────────────────────────────────────────────────────────────────────
// book subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn booking_without_conflict_is_admitted() {
    let json = run_json(&["book", "--request", &fixture("booking_ok.json")]);
    assert_eq!(json["phoneNumber"], "5551234567");
    assert_eq!(json["time"], "11:00");
    assert_eq!(json["durationMinutes"], 60);
}

#[test]
fn overlapping_booking_is_rejected() {
    Command::cargo_bin("availability")
        .unwrap()
        .args(["book", "--request", &fixture("booking_conflict.json")])
        .args(["-i", &schedule_path(), "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Time conflict"));
}

#[test]
fn booking_in_the_past_is_rejected() {
    Command::cargo_bin("availability")
        .unwrap()
        .args(["book", "--request", &fixture("booking_ok.json")])
        .args(["-i", &schedule_path(), "--now", "2026-03-16T12:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("in the past"));
}
