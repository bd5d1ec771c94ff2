use crate::common::command::{
    active_branch, commit_all, head_commit_id, init_repository_dir, reference, run_wit_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_commit_detaches_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let c1 = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("a.txt"), "world".to_string()));
    let c2 = commit_all(dir, "c2");

    run_wit_command(dir, &["checkout", &c1])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("HEAD is now at {}", &c1[..7])))
        .stderr(predicate::str::contains("detached HEAD"));

    assert_eq!(head_commit_id(dir), c1);
    assert_eq!(reference(dir, "master"), Some(c2));
    assert_eq!(active_branch(dir), "");
    assert_eq!(read_file(&dir.join("a.txt")), "hello");

    Ok(())
}

#[rstest]
fn checkout_head_keeps_active_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_wit_command(dir, &["checkout", "HEAD"])
        .assert()
        .success();

    assert_eq!(active_branch(dir), "master");
}

#[rstest]
fn checkout_branch_reattaches_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let c1 = head_commit_id(dir);
    run_wit_command(dir, &["checkout", &c1]).assert().success();

    run_wit_command(dir, &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(active_branch(dir), "master");
}
