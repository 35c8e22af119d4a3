//! Commands that read local state or definitions before touching the network.

#![allow(clippy::expect_used)]

use predicates::prelude::*;
use tempfile::TempDir;

use crate::cli_tests::vra7;

#[test]
fn status_of_an_unknown_machine_fails() {
    let state = TempDir::new().expect("tempdir");
    vra7()
        .env("VRA7_STATE_DIR", state.path())
        .args(["status", "web-01"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("web-01"));
}

#[test]
fn json_errors_carry_a_code() {
    let state = TempDir::new().expect("tempdir");
    let output = vra7()
        .env("VRA7_STATE_DIR", state.path())
        .args(["status", "web-01", "--json"])
        .output()
        .expect("run vra7");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "UNKNOWN_MACHINE");
}

#[test]
fn create_without_catalog_fails_before_connecting() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("web.yaml");
    std::fs::write(&file, "name: web-01\nwait_timeout: 5\n").expect("write");

    vra7()
        .env("VRA7_STATE_DIR", dir.path().join("state"))
        .arg("create")
        .arg("-f")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("catalog_name or catalog_id"));
}

#[test]
fn create_without_connection_settings_fails() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("web.yaml");
    std::fs::write(&file, "name: web-01\ncatalog_name: CentOS 7\n").expect("write");

    vra7()
        .env("VRA7_STATE_DIR", dir.path().join("state"))
        .args(["create", "-f"])
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("host"));
}

#[test]
fn status_of_a_machine_without_request_fails_offline() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("web-01.json"),
        r#"{"name":"web-01","config":{"name":"web-01","catalog_name":"CentOS 7"},"updated_at":"2026-10-19T08:00:00Z"}"#,
    )
    .expect("write");

    vra7()
        .env("VRA7_STATE_DIR", dir.path())
        .args(["status", "web-01"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no request is recorded"));
}

#[test]
fn delete_without_confirmation_in_ci_is_not_cancelled() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("web-01.json"),
        r#"{"name":"web-01","request_id":"req-1","phase":"SUCCESSFUL","config":{"name":"web-01","catalog_name":"CentOS 7"},"updated_at":"2026-10-19T08:00:00Z"}"#,
    )
    .expect("write");

    // CI skips the prompt; the missing connection settings stop it next.
    vra7()
        .env("VRA7_STATE_DIR", dir.path())
        .env("CI", "true")
        .args(["delete", "web-01"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("host"));
    assert!(dir.path().join("web-01.json").exists());
}
