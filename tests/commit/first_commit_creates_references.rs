use crate::common::command::{
    active_branch, commit_metadata, head_commit_id, read_references, repository_dir,
    run_wit_command, snapshot_path, wit_commit,
};
use crate::common::file::{FileSpec, tree_contents, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[rstest]
fn first_commit_creates_references(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "hello".to_string()));
    run_wit_command(dir, &["add", "a.txt"]).assert().success();

    wit_commit(dir, "c1")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[\(root-commit\) [0-9a-f]{7}\] c1\n$")?);

    let c1 = head_commit_id(dir);
    assert_eq!(c1.len(), 40);
    assert!(c1.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(
        read_references(dir),
        vec![
            ("HEAD".to_string(), c1.clone()),
            ("master".to_string(), c1.clone())
        ]
    );
    assert_eq!(active_branch(dir), "master");
    assert_eq!(
        commit_metadata(dir, &c1),
        "parent=None\ndate=Sun Jan  1 12:00:00 2023\nmessage=c1"
    );
    assert_eq!(
        tree_contents(&snapshot_path(dir, &c1)),
        BTreeMap::from([(PathBuf::from("a.txt"), "hello".to_string())])
    );

    Ok(())
}

#[rstest]
fn commit_message_flag_is_accepted(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();

    run_wit_command(dir, &["commit", "-m", "empty tree"])
        .assert()
        .success();

    let c1 = head_commit_id(dir);
    assert!(commit_metadata(dir, &c1).ends_with("message=empty tree"));
    assert!(tree_contents(&snapshot_path(dir, &c1)).is_empty());

    Ok(())
}
