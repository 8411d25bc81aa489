use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn partbin(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("partbin").unwrap();
    cmd.arg("--data-dir").arg(data_dir.path()).arg("--no-device");
    cmd
}

#[test]
fn add_list_checkout_roundtrip() {
    let dir = TempDir::new().unwrap();

    partbin(&dir)
        .args(["add", "abc-123", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1A"));

    partbin(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("abc-123"));

    partbin(&dir)
        .args(["checkout", "abc-123", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 left"));
}

#[test]
fn overdraw_fails_with_stock_message() {
    let dir = TempDir::new().unwrap();
    partbin(&dir).args(["add", "abc-123", "3"]).assert().success();

    partbin(&dir)
        .args(["checkout", "abc-123", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not enough stock"));

    // count untouched by the failed checkout
    partbin(&dir)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("abc-123  3"));
}

#[test]
fn near_duplicate_is_suggested_not_added() {
    let dir = TempDir::new().unwrap();
    partbin(&dir).args(["add", "abc-123", "10"]).assert().success();

    partbin(&dir)
        .args(["add", "abc-124", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Possible duplicate"));

    partbin(&dir)
        .args(["merge", "abc-123", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15"));
}

#[test]
fn delete_then_undo_restores() {
    let dir = TempDir::new().unwrap();
    partbin(&dir).args(["add", "abc-123", "10"]).assert().success();

    partbin(&dir)
        .args(["delete", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    // undo runs in a fresh process: the stack is in-memory, so there is
    // nothing to undo here
    partbin(&dir)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo"));
}

#[test]
fn strip_commands_degrade_without_device() {
    let dir = TempDir::new().unwrap();
    partbin(&dir)
        .args(["off", "1A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No LED controller"));
}
