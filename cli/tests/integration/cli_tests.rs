//! Argument parsing, help and version output.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

pub fn vra7() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vra7"));
    cmd.env("NO_COLOR", "1")
        .env_remove("VRA7_HOST")
        .env_remove("VRA7_USERNAME")
        .env_remove("VRA7_PASSWORD")
        .env_remove("VRA7_STATE_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_args_shows_help_and_exits_two() {
    vra7().assert().code(2).stderr(predicate::str::contains(
        "Declarative machine lifecycle for vRealize Automation 7",
    ));
}

#[test]
fn help_lists_every_command() {
    vra7()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("power-off"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn version_command_prints_the_package_version() {
    vra7()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("vra7 {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn version_command_json_is_valid() {
    let output = vra7()
        .args(["version", "--json"])
        .output()
        .expect("run vra7");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn create_requires_a_file() {
    vra7()
        .arg("create")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn unknown_command_is_rejected() {
    vra7()
        .arg("provision")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
