use crate::common::command::{
    active_branch, control_path, init_repository_dir, read_references, run_wit_command,
};
use crate::common::file::tree_contents;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_is_idempotent(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_wit_command(dir, &["checkout", &read_references(dir)[0].1])
        .assert()
        .success();

    let references_before = read_references(dir);
    let active_before = active_branch(dir);
    let staging_before = tree_contents(&control_path(dir).join("staging_area"));

    run_wit_command(dir, &["init"]).assert().success();

    assert_eq!(read_references(dir), references_before);
    assert_eq!(active_branch(dir), active_before);
    assert_eq!(
        tree_contents(&control_path(dir).join("staging_area")),
        staging_before
    );

    Ok(())
}
