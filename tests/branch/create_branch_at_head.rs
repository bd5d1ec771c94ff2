use crate::common::command::{
    commit_all, head_commit_id, init_repository_dir, read_references, reference, run_wit_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn create_branch_at_head(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let c1 = head_commit_id(dir);

    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();

    assert_eq!(
        read_references(dir),
        vec![
            ("HEAD".to_string(), c1.clone()),
            ("feature".to_string(), c1.clone()),
            ("master".to_string(), c1.clone()),
        ]
    );

    Ok(())
}

#[rstest]
fn existing_branch_is_moved_to_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("a.txt"), "world".to_string()));
    let c2 = commit_all(dir, "c2");

    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();

    assert_eq!(reference(dir, "feature"), Some(c2));

    Ok(())
}

#[rstest]
fn hierarchical_branch_name_is_accepted(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_wit_command(dir, &["branch", "topic/login"])
        .assert()
        .success();

    assert_eq!(reference(dir, "topic/login"), Some(head_commit_id(dir)));
}
