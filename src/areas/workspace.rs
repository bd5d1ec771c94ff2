use crate::artifacts::core::fs_tree;
use crate::errors::{Result, WitError};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// The user-visible working tree outside the control directory
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user supplied path into a path relative to the workspace root
    ///
    /// Relative paths are taken from the workspace root. The path must exist,
    /// stay inside the workspace and not point into a reserved entry.
    pub fn relative_path(&self, path: &str) -> Result<PathBuf> {
        let candidate = Path::new(path);
        let absolute_path = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.path.join(candidate)
        };

        let absolute_path = absolute_path
            .canonicalize()
            .map_err(|_| WitError::PathNotFound(candidate.to_path_buf()))?;

        let relative_path = absolute_path
            .strip_prefix(self.path.as_ref())
            .map_err(|_| WitError::PathNotFound(candidate.to_path_buf()))?
            .to_path_buf();

        if fs_tree::contains_reserved(&relative_path) {
            return Err(WitError::PathNotFound(candidate.to_path_buf()));
        }

        Ok(relative_path)
    }

    /// Normalise a path the user named without requiring it to exist
    ///
    /// Used for paths that may already be gone from the working tree, such as
    /// the argument of `rm`.
    pub fn lexical_relative_path(&self, path: &str) -> Result<PathBuf> {
        let candidate = Path::new(path);
        let candidate = if candidate.is_absolute() {
            candidate
                .strip_prefix(self.path.as_ref())
                .map_err(|_| WitError::PathNotFound(candidate.to_path_buf()))?
        } else {
            candidate
        };

        let mut relative_path = PathBuf::new();
        for component in candidate.components() {
            match component {
                Component::Normal(name) => relative_path.push(name),
                Component::CurDir => {}
                Component::ParentDir if relative_path.pop() => {}
                _ => return Err(WitError::PathNotFound(candidate.to_path_buf())),
            }
        }

        if fs_tree::contains_reserved(&relative_path) {
            return Err(WitError::PathNotFound(candidate.to_path_buf()));
        }

        Ok(relative_path)
    }

    /// Overwrite (or create) a working tree file from another file
    pub fn write_file_from(&self, relative_path: &Path, source: &Path) -> Result<()> {
        fs_tree::copy_file(source, &self.path.join(relative_path))?;
        debug!(path = %relative_path.display(), "workspace file written");
        Ok(())
    }

    /// Delete a working tree file and any directories it leaves empty
    pub fn remove_file(&self, relative_path: &Path) -> Result<()> {
        let path = self.path.join(relative_path);

        if path.exists() {
            fs_tree::remove_path(&path)?;
            fs_tree::prune_empty_parents(&path, &self.path)?;
            debug!(path = %relative_path.display(), "workspace file removed");
        }

        Ok(())
    }
}
