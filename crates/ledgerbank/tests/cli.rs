//! Runs the compiled binary against scripted stdin.

#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn run_script(store: &Path, lines: &[&str]) -> String {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ledgerbank"))
        .arg("--store")
        .arg(store)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let script = lines.join("\n") + "\n";
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn balance_persists_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("accounts.json");

    let first = run_script(
        &store,
        &["1", "alice", "pw1", "2", "alice", "pw1", "1", "100", "2", "30", "4", "3"],
    );
    assert!(first.contains("Deposited: $100.00"));
    assert!(first.contains("Withdrawn: $30.00"));

    let second = run_script(&store, &["2", "alice", "pw1", "3", "4", "3"]);
    assert!(second.contains("Your balance is: $70.00"));
}

#[test]
fn exit_option_returns_success() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_script(&dir.path().join("accounts.json"), &["3"]);
    assert!(out.contains("1. Create Account"));
    assert!(out.contains("Thank you for using the Banking Application!"));
}

#[test]
fn corrupt_store_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("accounts.json");
    std::fs::write(&store, b"garbage").unwrap();

    let out = run_script(&store, &["2", "alice", "pw1", "3"]);
    assert!(out.contains("Invalid username or password."));
}
