//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary against a JSON store snapshot, including stdin
//! input, engine flag overrides, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the shop.json store fixture.
fn shop_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/shop.json")
}

/// Helper: path to the hourly.json config fixture.
fn hourly_config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/hourly.json")
}

fn shop_json() -> String {
    std::fs::read_to_string(shop_path()).expect("shop.json fixture must exist")
}

fn slots() -> Command {
    Command::cargo_bin("slots").unwrap()
}

/// Run a command expected to succeed and parse its stdout as JSON.
fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("slots must run");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// available
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn available_for_pinned_professional_prints_one_slot_per_line() {
    slots()
        .args([
            "available",
            "-s",
            shop_path(),
            "-d",
            "2026-03-16",
            "--service",
            "svc-cut",
            "--professional",
            "pro-a",
        ])
        .assert()
        .success()
        .stdout("09:00\n09:30\n10:30\n11:30\n");
}

#[test]
fn available_without_professional_unions_everyone_as_json() {
    let value = stdout_json(slots().args([
        "available",
        "-s",
        shop_path(),
        "-d",
        "2026-03-16",
        "--service",
        "svc-cut",
        "--json",
    ]));

    assert_eq!(
        value,
        serde_json::json!(["09:00", "09:30", "10:30", "11:00", "11:30", "13:00", "13:30"])
    );
}

#[test]
fn available_reads_store_from_stdin() {
    slots()
        .args(["available", "-d", "2026-03-17", "--service", "svc-cut"])
        .write_stdin(shop_json())
        .assert()
        .success()
        .stdout("09:00\n09:30\n");
}

#[test]
fn available_by_period_splits_at_noon() {
    let value = stdout_json(slots().args([
        "available",
        "-s",
        shop_path(),
        "-d",
        "2026-03-16",
        "--service",
        "svc-cut",
        "--by-period",
        "--json",
    ]));

    assert_eq!(
        value["morning"],
        serde_json::json!(["09:00", "09:30", "10:30", "11:00", "11:30"])
    );
    assert_eq!(value["afternoon"], serde_json::json!(["13:00", "13:30"]));
}

#[test]
fn available_by_period_marks_an_empty_period() {
    slots()
        .args([
            "available",
            "-s",
            shop_path(),
            "-d",
            "2026-03-17",
            "--service",
            "svc-cut",
            "--by-period",
        ])
        .assert()
        .success()
        .stdout("Morning:   09:00 09:30\nAfternoon: (none)\n");
}

#[test]
fn available_for_unknown_service_prints_nothing() {
    slots()
        .args([
            "available",
            "-s",
            shop_path(),
            "-d",
            "2026-03-16",
            "--service",
            "svc-missing",
        ])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn available_on_closed_day_prints_nothing() {
    slots()
        .args([
            "available",
            "-s",
            shop_path(),
            "-d",
            "2026-03-15",
            "--service",
            "svc-cut",
        ])
        .assert()
        .success()
        .stdout("");
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine configuration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn exclude_cancelled_frees_the_cancelled_slot() {
    slots()
        .args([
            "--exclude-cancelled",
            "available",
            "-s",
            shop_path(),
            "-d",
            "2026-03-16",
            "--service",
            "svc-cut",
            "--professional",
            "pro-a",
        ])
        .assert()
        .success()
        .stdout("09:00\n09:30\n10:30\n11:00\n11:30\n");
}

#[test]
fn config_file_sets_the_step() {
    slots()
        .args([
            "--config",
            hourly_config_path(),
            "available",
            "-s",
            shop_path(),
            "-d",
            "2026-03-16",
            "--service",
            "svc-cut",
            "--professional",
            "pro-a",
        ])
        .assert()
        .success()
        .stdout("09:00\n");
}

#[test]
fn step_flag_overrides_config_file() {
    slots()
        .args([
            "--config",
            hourly_config_path(),
            "--step",
            "30",
            "available",
            "-s",
            shop_path(),
            "-d",
            "2026-03-16",
            "--service",
            "svc-cut",
            "--professional",
            "pro-a",
        ])
        .assert()
        .success()
        .stdout("09:00\n09:30\n10:30\n11:30\n");
}

#[test]
fn zero_step_is_rejected() {
    slots()
        .args([
            "--step",
            "0",
            "available",
            "-s",
            shop_path(),
            "-d",
            "2026-03-16",
            "--service",
            "svc-cut",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("step_minutes"));
}

// ─────────────────────────────────────────────────────────────────────────────
// by-professional / resolve / days
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn by_professional_lists_each_eligible_professional() {
    let value = stdout_json(slots().args([
        "by-professional",
        "-s",
        shop_path(),
        "-d",
        "2026-03-16",
        "--service",
        "svc-cut",
    ]));

    assert_eq!(
        value["pro-a"],
        serde_json::json!(["09:00", "09:30", "10:30", "11:30"])
    );
    assert_eq!(
        value["pro-b"],
        serde_json::json!(["11:00", "11:30", "13:00", "13:30"])
    );
    assert!(value.get("pro-c").is_none());
}

#[test]
fn resolve_assigns_the_free_professional() {
    let value = stdout_json(slots().args([
        "resolve",
        "-s",
        shop_path(),
        "-d",
        "2026-03-16",
        "--service",
        "svc-cut",
        "--slot",
        "11:00",
    ]));

    assert_eq!(value["professional_id"], "pro-b");
    assert_eq!(value["slot"], "11:00");
    assert_eq!(value["start"], "2026-03-16T11:00:00");
    assert_eq!(value["end"], "2026-03-16T11:30:00");
}

#[test]
fn resolve_prefers_store_order_when_both_are_free() {
    let value = stdout_json(slots().args([
        "--exclude-cancelled",
        "resolve",
        "-s",
        shop_path(),
        "-d",
        "2026-03-16",
        "--service",
        "svc-cut",
        "--slot",
        "11:00",
    ]));

    assert_eq!(value["professional_id"], "pro-a");
}

#[test]
fn resolve_fails_when_nobody_is_free() {
    slots()
        .args([
            "resolve",
            "-s",
            shop_path(),
            "-d",
            "2026-03-16",
            "--service",
            "svc-cut",
            "--slot",
            "15:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No professional is free"));
}

#[test]
fn resolve_rejects_malformed_slot() {
    slots()
        .args([
            "resolve",
            "-s",
            shop_path(),
            "-d",
            "2026-03-16",
            "--service",
            "svc-cut",
            "--slot",
            "noon",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid slot"));
}

#[test]
fn days_lists_only_open_dates() {
    slots()
        .args([
            "days",
            "-s",
            shop_path(),
            "--from",
            "2026-03-15",
            "--to",
            "2026-03-17",
            "--service",
            "svc-cut",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-16  09:00"))
        .stdout(predicate::str::contains("2026-03-17  09:00 09:30"))
        .stdout(predicate::str::contains("2026-03-15").not());
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_store_file_fails() {
    slots()
        .args([
            "available",
            "-s",
            "/nonexistent/shop.json",
            "-d",
            "2026-03-16",
            "--service",
            "svc-cut",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn malformed_store_fails() {
    slots()
        .args(["available", "-d", "2026-03-16", "--service", "svc-cut"])
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load store snapshot"));
}

#[test]
fn bad_date_is_a_usage_error() {
    slots()
        .args([
            "available",
            "-s",
            shop_path(),
            "-d",
            "16/03/2026",
            "--service",
            "svc-cut",
        ])
        .assert()
        .failure();
}
