use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("fund-ledger"));
    cmd.env_remove("RUST_LOG").arg("tests/fixtures/operations.csv");

    cmd.assert()
        .success()
        .stdout(predicate::eq("account,balance\nA,700\nB,800\n"))
        .stderr(predicate::str::contains("Insufficient balance in account B"));

    Ok(())
}

#[test]
fn test_cli_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(cargo_bin!("fund-ledger"))
        .env_remove("RUST_LOG")
        .arg("tests/fixtures/operations.csv")
        .arg("--format")
        .arg("json")
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value[0]["account"], "A");
    assert_eq!(value[0]["balance"], "700");
    assert_eq!(value[1]["account"], "B");
    assert_eq!(value[1]["balance"], "800");

    Ok(())
}

#[test]
fn test_cli_missing_input_fails() {
    let mut cmd = Command::new(cargo_bin!("fund-ledger"));
    cmd.env_remove("RUST_LOG").arg("tests/fixtures/does_not_exist.csv");

    cmd.assert().failure();
}

#[test]
fn test_cli_json_logs() {
    let mut cmd = Command::new(cargo_bin!("fund-ledger"));
    cmd.env_remove("RUST_LOG")
        .arg("tests/fixtures/operations.csv")
        .arg("--json-logs");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("\"level\":\"WARN\""));
}
