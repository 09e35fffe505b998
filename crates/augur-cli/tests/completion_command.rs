use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_augur_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("augur")
}

#[test]
fn test_completion_generates_bash_script() {
    let mut cmd = Command::new(get_augur_bin());
    cmd.arg("completion").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("augur"));
}

#[test]
fn test_completion_rejects_unknown_shell() {
    let mut cmd = Command::new(get_augur_bin());
    cmd.arg("completion").arg("dos");

    cmd.assert().failure();
}
