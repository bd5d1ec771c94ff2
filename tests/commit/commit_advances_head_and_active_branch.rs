use crate::common::command::{
    commit_all, commit_metadata, head_commit_id, init_repository_dir, reference, run_wit_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_advances_head_and_active_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let c1 = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("a.txt"), "world".to_string()));

    let c2 = commit_all(dir, "c2");

    assert_ne!(c1, c2);
    assert_eq!(reference(dir, "master"), Some(c2.clone()));
    assert!(commit_metadata(dir, &c2).starts_with(&format!("parent={c1}\n")));

    Ok(())
}

#[rstest]
fn detached_commit_moves_only_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let c1 = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("a.txt"), "world".to_string()));
    let c2 = commit_all(dir, "c2");

    run_wit_command(dir, &["checkout", &c1]).assert().success();
    write_file(FileSpec::new(dir.join("b.txt"), "bee".to_string()));
    let c3 = commit_all(dir, "c3");

    assert_eq!(head_commit_id(dir), c3.clone());
    assert_eq!(reference(dir, "master"), Some(c2));
    assert!(commit_metadata(dir, &c3).starts_with(&format!("parent={c1}\n")));

    Ok(())
}
