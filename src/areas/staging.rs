//! Staging area
//!
//! A mirror of the tracked part of the working tree, kept as plain files under
//! `.wit/staging_area/`. `add` and `rm` are its only writers; commit snapshots
//! it, and status and checkout compare against it.

use crate::artifacts::core::fs_tree;
use crate::errors::{Result, WitError};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct StagingArea {
    /// Path to the staging directory (typically `.wit/staging_area`)
    path: Box<Path>,
}

impl StagingArea {
    pub fn new(path: Box<Path>) -> Self {
        StagingArea { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn staged_path(&self, relative_path: &Path) -> PathBuf {
        self.path.join(relative_path)
    }

    pub fn is_staged(&self, relative_path: &Path) -> bool {
        self.staged_path(relative_path).exists()
    }

    /// Stage a file or a directory from the working tree
    ///
    /// A staged directory is replaced wholesale, so files removed from the
    /// working copy of that directory disappear from the stage as well.
    pub fn stage(&self, workspace_root: &Path, relative_path: &Path) -> Result<usize> {
        let source = workspace_root.join(relative_path);
        let target = self.staged_path(relative_path);

        if source.is_dir() {
            if target.exists() {
                fs_tree::remove_path(&target)?;
            }
            let copied = fs_tree::copy_tree(&source, &target)?;
            debug!(path = %relative_path.display(), copied, "staged directory");
            Ok(copied)
        } else if source.is_file() {
            fs_tree::copy_file(&source, &target)?;
            debug!(path = %relative_path.display(), "staged file");
            Ok(1)
        } else {
            Err(WitError::PathNotFound(relative_path.to_path_buf()))
        }
    }

    /// Remove a file or directory from the stage only
    pub fn unstage(&self, relative_path: &Path) -> Result<()> {
        let target = self.staged_path(relative_path);

        if !target.exists() {
            return Err(WitError::PathNotFound(relative_path.to_path_buf()));
        }

        fs_tree::remove_path(&target)?;
        if relative_path.as_os_str().is_empty() {
            // unstaging the root empties the stage but keeps the directory
            std::fs::create_dir_all(&self.path)?;
        } else {
            fs_tree::prune_empty_parents(&target, &self.path)?;
        }

        debug!(path = %relative_path.display(), "unstaged");

        Ok(())
    }

    /// Replace the whole staging area with a copy of `tree`
    ///
    /// The copy is built next to the current stage and swapped in afterwards,
    /// so a failed copy leaves the current stage untouched.
    pub fn replace_with(&self, tree: &Path) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| WitError::PathNotFound(self.path.to_path_buf()))?;

        let replacement = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(parent)?;
        fs_tree::copy_tree(tree, replacement.path())?;

        if self.path.exists() {
            std::fs::remove_dir_all(&self.path)?;
        }
        let replacement = replacement.keep();
        std::fs::rename(&replacement, &self.path)
            .map_err(|e| WitError::copy_failure(&replacement, self.path.as_ref(), e))?;

        debug!(from = %tree.display(), "staging area replaced");

        Ok(())
    }
}
