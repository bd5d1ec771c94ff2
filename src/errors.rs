//! Error types for repository operations
//!
//! Structural errors (uninitialized repository, bad path, unknown branch,
//! same-branch merge, stale-head merge) are raised before any persisted state
//! is touched. `CopyFailure` is raised from the middle of a tree copy and is
//! always propagated to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used by the storage areas and algorithms
pub type Result<T> = std::result::Result<T, WitError>;

#[derive(Debug, Error)]
pub enum WitError {
    /// The control directory is missing, or no commit exists yet
    #[error("uninitialized repository: {0}")]
    UninitializedRepository(String),

    /// A user supplied path does not exist where it was expected
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Checkout found staged, unstaged or clobbered untracked changes
    #[error("pending changes block checkout: {}", display_paths(.0))]
    UncommittedChangesBlockCheckout(Vec<PathBuf>),

    /// The argument names neither a reference nor a stored commit
    #[error("cannot resolve '{0}' to a reference or commit")]
    UnresolvableReference(String),

    #[error("unknown branch '{0}'")]
    UnknownBranch(String),

    #[error("cannot merge '{0}': it points at the current HEAD commit")]
    SameBranchMerge(String),

    /// The active branch is missing or does not point at HEAD
    #[error("cannot merge from a detached or stale HEAD (active branch: {})", .active.as_deref().unwrap_or("<none>"))]
    DetachedOrStaleHeadMerge { active: Option<String> },

    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    CopyFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("malformed metadata in {}: {reason}", .path.display())]
    MalformedMetadata { path: PathBuf, reason: String },

    #[error("failed to acquire repository lock at {}: {source}", .path.display())]
    RepositoryLocked {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl WitError {
    pub(crate) fn copy_failure(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        WitError::CopyFailure {
            from: from.into(),
            to: to.into(),
            source,
        }
    }
}
