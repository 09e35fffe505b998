use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_augur_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("augur")
}

#[test]
fn test_serve_command_help() {
    let mut cmd = Command::new(get_augur_bin());
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Run the HTTP bridge API"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--profile-dir"))
        .stdout(predicate::str::contains("--chrome-path"))
        .stdout(predicate::str::contains("--url"));
}

#[test]
fn test_serve_temp_profile_flag_in_help() {
    let mut cmd = Command::new(get_augur_bin());
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--temp-profile"))
        .stdout(predicate::str::contains("throwaway profile"));
}

#[test]
fn test_serve_rejects_profile_dir_with_temp_profile() {
    let mut cmd = Command::new(get_augur_bin());
    cmd.arg("serve")
        .arg("--profile-dir")
        .arg("/tmp/some-profile")
        .arg("--temp-profile");

    cmd.assert().failure();
}

#[test]
fn test_serve_rejects_invalid_url() {
    let mut cmd = Command::new(get_augur_bin());
    cmd.arg("serve").arg("--url").arg("not a url");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target URL"));
}
