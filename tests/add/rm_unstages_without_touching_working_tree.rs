use crate::common::command::{init_repository_dir, run_wit_command, staging_path};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn rm_unstages_without_touching_working_tree(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_wit_command(dir, &["rm", "a.txt"]).assert().success();

    assert!(!staging_path(dir).join("a.txt").exists());
    assert_eq!(read_file(&dir.join("a.txt")), "hello");

    Ok(())
}

#[rstest]
fn rm_prunes_emptied_staged_directories(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(
        dir.join("docs").join("guide").join("intro.md"),
        "intro".to_string(),
    ));
    run_wit_command(dir, &["add", "docs"]).assert().success();

    run_wit_command(dir, &["rm", "docs/guide/intro.md"])
        .assert()
        .success();

    assert!(!staging_path(dir).join("docs").exists());
    assert!(dir.join("docs").join("guide").join("intro.md").exists());

    Ok(())
}

#[rstest]
fn rm_of_unstaged_path_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("b.txt"), "bee".to_string()));

    run_wit_command(dir, &["rm", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path not found: b.txt"));
}
