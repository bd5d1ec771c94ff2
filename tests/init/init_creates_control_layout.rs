use crate::common::command::{active_branch, control_path, repository_dir, run_wit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_creates_control_layout(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_wit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty wit repository in .+\.wit\n$",
        )?);

    let control = control_path(repository_dir.path());
    assert!(control.join("images").is_dir());
    assert!(control.join("staging_area").is_dir());
    assert!(!control.join("references.txt").exists());
    assert_eq!(active_branch(repository_dir.path()), "master");

    Ok(())
}

#[rstest]
fn init_at_explicit_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let nested = repository_dir.path().join("project");

    run_wit_command(
        repository_dir.path(),
        &["--path", &nested.to_string_lossy(), "init"],
    )
    .assert()
    .success();

    assert!(control_path(&nested).join("staging_area").is_dir());
    assert!(!control_path(repository_dir.path()).exists());

    Ok(())
}
