mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_malformed_event_rows_are_skipped() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("events.csv");
    common::write_event_script(
        &script,
        &[
            ("order", 101, "Telegram Stars"),
            // Unknown event kind: rejected by the reader, not the engine.
            ("teleport", 101, "x"),
            ("callback", 7, "approve_order_ORD-1"),
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("orderdesk"));
    cmd.arg(&script).arg("--admin").arg("7");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading event"))
        // Processing continues past the bad row.
        .stdout(predicate::str::contains("101,order_approved"));
}

#[test]
fn test_malformed_payloads_and_unknown_ids_become_error_lines() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("events.csv");
    common::write_event_script(
        &script,
        &[
            ("callback", 7, "approve_order"),
            ("callback", 7, "approve_order_ORD-99"),
            ("order", 101, "Unknown Plan"),
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("orderdesk"));
    cmd.arg(&script).arg("--admin").arg("7");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("7,error,invalid format"))
        .stdout(predicate::str::contains("7,error,order ORD-99 not found"))
        .stdout(predicate::str::contains("101,error,unknown service: Unknown Plan"));
}
