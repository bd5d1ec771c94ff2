use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with `a.txt = "hello"` committed as `c1` on master
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_wit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello".to_string(),
    ));

    run_wit_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    wit_commit(repository_dir.path(), "c1").assert().success();

    repository_dir
}

pub fn run_wit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("wit").expect("Failed to find wit binary");
    cmd.envs(vec![("NO_COLOR", "1"), ("WIT_LOG", "off")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn wit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_wit_command(dir, &["commit", message]);
    cmd.env("WIT_COMMIT_DATE", COMMIT_DATE);
    cmd
}

/// Stage everything in the working tree and commit it, returning the new HEAD
pub fn commit_all(dir: &Path, message: &str) -> String {
    run_wit_command(dir, &["add", "."]).assert().success();
    wit_commit(dir, message).assert().success();
    head_commit_id(dir)
}

pub fn control_path(dir: &Path) -> PathBuf {
    dir.join(".wit")
}

/// `(name, commit id)` pairs in file order
pub fn read_references(dir: &Path) -> Vec<(String, String)> {
    let content = std::fs::read_to_string(control_path(dir).join("references.txt"))
        .expect("Failed to read references");

    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (name, id) = line.split_once('=').expect("name=id line");
            (name.to_string(), id.to_string())
        })
        .collect()
}

pub fn reference(dir: &Path, name: &str) -> Option<String> {
    read_references(dir)
        .into_iter()
        .find(|(ref_name, _)| ref_name == name)
        .map(|(_, id)| id)
}

pub fn head_commit_id(dir: &Path) -> String {
    reference(dir, "HEAD").expect("HEAD reference")
}

pub fn active_branch(dir: &Path) -> String {
    std::fs::read_to_string(control_path(dir).join("activated.txt"))
        .expect("Failed to read active branch")
}

pub fn snapshot_path(dir: &Path, commit_id: &str) -> PathBuf {
    control_path(dir).join("images").join(commit_id)
}

pub fn staging_path(dir: &Path) -> PathBuf {
    control_path(dir).join("staging_area")
}

pub fn commit_metadata(dir: &Path, commit_id: &str) -> String {
    std::fs::read_to_string(
        control_path(dir)
            .join("images")
            .join(format!("{commit_id}.txt")),
    )
    .expect("Failed to read commit metadata")
}

/// Number of stored commits
pub fn commit_count(dir: &Path) -> usize {
    std::fs::read_dir(control_path(dir).join("images"))
        .expect("Failed to read images")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "txt"))
        .count()
}
