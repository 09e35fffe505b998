use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_augur_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("augur")
}

#[test]
fn test_ask_command_help() {
    let mut cmd = Command::new(get_augur_bin());
    cmd.arg("ask").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Ask a single question and print the reply",
        ))
        .stdout(predicate::str::contains("--image"))
        .stdout(predicate::str::contains("--profile-dir"));
}

#[test]
fn test_ask_requires_prompt_text() {
    let mut cmd = Command::new(get_augur_bin());
    cmd.arg("ask");

    cmd.assert().failure();
}

#[test]
fn test_ask_fails_fast_on_missing_attachment() {
    // Checked before any browser work, so this is safe without Chrome.
    let mut cmd = Command::new(get_augur_bin());
    cmd.arg("ask")
        .arg("describe this")
        .arg("--image")
        .arg("/nonexistent/picture.png");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("attachment not found"));
}

#[test]
fn test_ask_fails_on_missing_chrome_binary() {
    // An explicit chrome path skips discovery, so this fails fast even on
    // machines with Chrome installed.
    let temp = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(get_augur_bin());
    cmd.arg("ask")
        .arg("hello")
        .arg("--chrome-path")
        .arg("/nonexistent/chrome")
        .arg("--profile-dir")
        .arg(temp.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Chrome not found"));
}
