use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_options() {
    cargo_bin_cmd!("glide")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("interval-ms"))
        .stdout(predicate::str::contains("no-animations"))
        .stdout(predicate::str::contains("TEXT"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("glide")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
