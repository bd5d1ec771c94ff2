use crate::common::command::{
    active_branch, commit_all, head_commit_id, init_repository_dir, run_wit_command,
    snapshot_path, staging_path,
};
use crate::common::file::{FileSpec, read_file, tree_contents, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_branch_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let c1 = head_commit_id(dir);
    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("a.txt"), "world".to_string()));
    write_file(FileSpec::new(dir.join("src").join("main.rs"), "main".to_string()));
    commit_all(dir, "c2");

    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to branch 'feature'"));

    assert_eq!(head_commit_id(dir), c1);
    assert_eq!(active_branch(dir), "feature");
    assert_eq!(read_file(&dir.join("a.txt")), "hello");
    // files only in the previous commit are removed, along with emptied directories
    assert!(!dir.join("src").exists());
    assert_eq!(tree_contents(dir), tree_contents(&snapshot_path(dir, &c1)));
    assert_eq!(
        tree_contents(&staging_path(dir)),
        tree_contents(&snapshot_path(dir, &c1))
    );

    Ok(())
}

#[rstest]
fn untracked_files_survive_checkout(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("a.txt"), "world".to_string()));
    commit_all(dir, "c2");
    write_file(FileSpec::new(dir.join("scratch.txt"), "mine".to_string()));

    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("scratch.txt")), "mine");
    assert_eq!(read_file(&dir.join("a.txt")), "hello");

    Ok(())
}
