//! Binary-level smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_describes_the_pipeline() {
    Command::cargo_bin("amiya-packager")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--upload"))
        .stdout(predicate::str::contains("SECRETID"));
}

#[test]
fn missing_release_tracking_file_is_reported() {
    // No version argument and no .github/publish.txt in the working directory
    let tmp = tempfile::tempdir().expect("tempdir");

    Command::cargo_bin("amiya-packager")
        .expect("binary")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("release-tracking file"));
}
