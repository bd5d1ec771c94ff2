//! Checkout migration and conflict detection
//!
//! Moving the working tree from the current commit to a target commit is
//! planned before anything is touched:
//!
//! 1. Every file of the target snapshot is scheduled for writing
//! 2. Files of the current snapshot that the target lacks are scheduled for
//!    deletion
//! 3. Pending changes are collected: staged-but-uncommitted work, unstaged
//!    edits to tracked files, and untracked files a write would clobber
//!
//! The caller applies the plan only when no pending change was found, so a
//! blocked checkout leaves every area as it was.

use crate::areas::workspace::Workspace;
use crate::artifacts::checkout::conflict::{ConflictType, PendingChanges};
use crate::artifacts::core::fs_tree;
use crate::artifacts::diff::tree_diff::{DiffSides, TreeDiff};
use crate::errors::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Migration {
    current_snapshot: PathBuf,
    target_snapshot: PathBuf,
    /// Files copied from the target snapshot into the working tree
    writes: BTreeSet<PathBuf>,
    /// Files of the current snapshot absent from the target
    deletes: BTreeSet<PathBuf>,
}

impl Migration {
    pub fn plan(current_snapshot: &Path, target_snapshot: &Path) -> Result<Self> {
        let writes = fs_tree::list_files(target_snapshot)?;
        let deletes = fs_tree::list_files(current_snapshot)?
            .into_iter()
            .filter(|path| !writes.contains(path))
            .collect::<BTreeSet<_>>();

        debug!(
            writes = writes.len(),
            deletes = deletes.len(),
            "checkout migration planned"
        );

        Ok(Migration {
            current_snapshot: current_snapshot.to_path_buf(),
            target_snapshot: target_snapshot.to_path_buf(),
            writes,
            deletes,
        })
    }

    pub fn writes(&self) -> &BTreeSet<PathBuf> {
        &self.writes
    }

    pub fn deletes(&self) -> &BTreeSet<PathBuf> {
        &self.deletes
    }

    pub fn pending_changes(&self, staging: &Path, workspace: &Path) -> Result<PendingChanges> {
        let mut pending = PendingChanges::default();

        for path in TreeDiff::compare(&self.current_snapshot, staging)?.paths() {
            pending.record(ConflictType::StagedChange, path);
        }

        for path in TreeDiff::compare(staging, workspace)?
            .filter(DiffSides::MODIFIED | DiffSides::ONLY_IN_A)
            .paths()
        {
            pending.record(ConflictType::UnstagedChange, path);
        }

        for path in &self.writes {
            if self.overwrites_untracked(path, staging, workspace)? {
                pending.record(ConflictType::UntrackedOverwritten, path);
            }
        }

        Ok(pending)
    }

    /// Whether writing `path` would destroy a file the staging area does not track
    fn overwrites_untracked(&self, path: &Path, staging: &Path, workspace: &Path) -> Result<bool> {
        let blocking_parent = path
            .ancestors()
            .skip(1)
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .any(|ancestor| {
                workspace.join(ancestor).is_file() && !staging.join(ancestor).is_file()
            });
        if blocking_parent {
            return Ok(true);
        }

        let working_file = workspace.join(path);
        if !working_file.exists() || staging.join(path).is_file() {
            return Ok(false);
        }
        if working_file.is_dir() {
            return Ok(true);
        }

        Ok(std::fs::read(&working_file)? != std::fs::read(self.target_snapshot.join(path))?)
    }

    /// Sync the working tree to the target snapshot
    ///
    /// Deletions run first so a file can give way to a directory of the same
    /// name in the target.
    pub fn apply(&self, workspace: &Workspace) -> Result<()> {
        for path in &self.deletes {
            workspace.remove_file(path)?;
        }

        for path in &self.writes {
            workspace.write_file_from(path, &self.target_snapshot.join(path))?;
        }

        debug!(
            writes = self.writes.len(),
            deletes = self.deletes.len(),
            "checkout migration applied"
        );

        Ok(())
    }
}
