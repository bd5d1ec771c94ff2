use crate::common::command::{repository_dir, run_wit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case(&["add", "a.txt"])]
#[case(&["commit", "message"])]
#[case(&["status"])]
#[case(&["branch", "feature"])]
#[case(&["checkout", "master"])]
#[case(&["merge", "feature"])]
#[case(&["graph"])]
fn commands_fail_outside_a_repository(repository_dir: TempDir, #[case] args: &[&str]) {
    std::fs::write(repository_dir.path().join("a.txt"), "hello").expect("Failed to write file");

    run_wit_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("uninitialized repository"));

    assert!(!repository_dir.path().join(".wit").exists());
}

#[rstest]
fn commands_do_not_create_a_missing_root(repository_dir: TempDir) {
    let missing = repository_dir.path().join("missing");

    run_wit_command(repository_dir.path(), &["-C", "missing", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("uninitialized repository"));

    assert!(!missing.exists());
}

#[rstest]
fn init_creates_a_missing_root(repository_dir: TempDir) {
    let missing = repository_dir.path().join("missing");

    run_wit_command(repository_dir.path(), &["-C", "missing", "init"])
        .assert()
        .success();

    assert!(missing.join(".wit").join("images").is_dir());
    assert!(missing.join(".wit").join("activated.txt").is_file());
}
