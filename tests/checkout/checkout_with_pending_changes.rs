use crate::common::command::{
    active_branch, commit_all, control_path, head_commit_id, init_repository_dir,
    read_references, run_wit_command,
};
use crate::common::file::{FileSpec, tree_contents, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

struct Snapshot {
    references: Vec<(String, String)>,
    active_branch: String,
    staging: std::collections::BTreeMap<std::path::PathBuf, String>,
    working: std::collections::BTreeMap<std::path::PathBuf, String>,
}

fn snapshot(dir: &Path) -> Snapshot {
    Snapshot {
        references: read_references(dir),
        active_branch: active_branch(dir),
        staging: tree_contents(&control_path(dir).join("staging_area")),
        working: tree_contents(dir),
    }
}

fn assert_unchanged(dir: &Path, before: Snapshot) {
    let after = snapshot(dir);
    assert_eq!(after.references, before.references);
    assert_eq!(after.active_branch, before.active_branch);
    assert_eq!(after.staging, before.staging);
    assert_eq!(after.working, before.working);
}

fn repository_with_branch(dir: &Path) -> String {
    let c1 = head_commit_id(dir);
    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("b.txt"), "bee".to_string()));
    commit_all(dir, "c2");
    c1
}

#[rstest]
fn unstaged_change_blocks_checkout(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    repository_with_branch(dir);
    write_file(FileSpec::new(dir.join("a.txt"), "edited".to_string()));
    let before = snapshot(dir);

    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Your local changes to the following files would be overwritten by checkout:",
        ))
        .stderr(predicate::str::contains("\ta.txt"))
        .stderr(predicate::str::contains("pending changes block checkout: a.txt"));

    assert_unchanged(dir, before);
}

#[rstest]
fn staged_but_uncommitted_change_blocks_checkout(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    repository_with_branch(dir);
    write_file(FileSpec::new(dir.join("a.txt"), "staged".to_string()));
    run_wit_command(dir, &["add", "a.txt"]).assert().success();
    let before = snapshot(dir);

    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Your staged changes to the following files are not committed:",
        ));

    assert_unchanged(dir, before);
}

#[rstest]
fn untracked_file_in_the_way_blocks_checkout(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let c1 = repository_with_branch(dir);
    run_wit_command(dir, &["checkout", &c1]).assert().success();
    write_file(FileSpec::new(dir.join("b.txt"), "mine".to_string()));
    let before = snapshot(dir);

    run_wit_command(dir, &["checkout", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The following untracked working tree files would be overwritten by checkout:",
        ))
        .stderr(predicate::str::contains("\tb.txt"));

    assert_unchanged(dir, before);
}
