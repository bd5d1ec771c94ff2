//! Directory tree helpers
//!
//! Every walk here skips the reserved entries (the control directory and
//! editor/OS artifacts) at any depth, so the working tree, the staging area and
//! the snapshots can be treated uniformly.

use crate::errors::{Result, WitError};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Name of the control directory at the repository root
pub const ROOT_MARKER: &str = ".wit";

/// Entries excluded from every comparison and copy
pub const RESERVED_ENTRIES: phf::Set<&'static str> = phf::phf_set! {
    ".wit",
    ".DS_Store",
};

pub fn is_reserved(name: &OsStr) -> bool {
    name.to_str()
        .map(|name| RESERVED_ENTRIES.contains(name))
        .unwrap_or(false)
}

/// Check whether any component of a relative path is reserved
pub fn contains_reserved(path: &Path) -> bool {
    path.components().any(|component| match component {
        std::path::Component::Normal(name) => is_reserved(name),
        _ => false,
    })
}

/// Recursively copy `from` into `to`, creating `to` if needed
///
/// Existing files under `to` are overwritten; files under `to` that do not
/// exist in `from` are left alone. Returns the number of files copied.
pub fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    if !from.is_dir() {
        let source = std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "source is not a directory",
        );
        return Err(WitError::copy_failure(from, to, source));
    }

    std::fs::create_dir_all(to).map_err(|e| WitError::copy_failure(from, to, e))?;

    let mut copied = 0;
    let walker = WalkDir::new(from)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_reserved(entry.file_name()));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop while copying"));
            WitError::copy_failure(from, to, source)
        })?;

        let relative_path = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| WitError::copy_failure(from, to, std::io::Error::other(e)))?;
        let target = to.join(relative_path);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .map_err(|e| WitError::copy_failure(entry.path(), &target, e))?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    debug!(from = %from.display(), to = %to.display(), copied, "copied tree");

    Ok(copied)
}

/// Copy a single file, creating its parent directories
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).map_err(|e| WitError::copy_failure(from, to, e))?;
    }

    // a directory sitting where the file goes is replaced
    if to.is_dir() {
        std::fs::remove_dir_all(to).map_err(|e| WitError::copy_failure(from, to, e))?;
    }

    std::fs::copy(from, to).map_err(|e| WitError::copy_failure(from, to, e))?;

    Ok(())
}

/// List every file under `root` as a path relative to `root`
///
/// A missing root is an empty tree.
pub fn list_files(root: &Path) -> Result<BTreeSet<PathBuf>> {
    if !root.exists() {
        return Ok(BTreeSet::new());
    }

    let mut files = BTreeSet::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_reserved(entry.file_name()));

    for entry in walker {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop while listing"))
        })?;

        if !entry.file_type().is_dir() {
            let relative_path = entry
                .path()
                .strip_prefix(root)
                .map_err(std::io::Error::other)?;
            files.insert(relative_path.to_path_buf());
        }
    }

    Ok(files)
}

/// Remove a file or a whole directory
pub fn remove_path(path: &Path) -> Result<()> {
    let metadata = std::fs::symlink_metadata(path)?;

    if metadata.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }

    Ok(())
}

/// Remove empty directories between `path`'s parent and `stop_at` (exclusive)
pub fn prune_empty_parents(path: &Path, stop_at: &Path) -> Result<()> {
    let mut current = path.parent();

    while let Some(dir) = current
        && dir != stop_at
        && dir.starts_with(stop_at)
        && dir.is_dir()
        && dir.read_dir()?.next().is_none()
    {
        std::fs::remove_dir(dir)?;
        current = dir.parent();
    }

    Ok(())
}
