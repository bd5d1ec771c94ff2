//! Repository-level lock
//!
//! Mutating commands hold an exclusive lock on `.wit/lock` for their whole
//! duration, so two invocations cannot interleave reference writes or tree
//! copies. The lock is released when the guard is dropped.

use crate::errors::{Result, WitError};
use file_guard::{FileGuard, Lock};
use std::fs::File;
use std::path::Path;
use tracing::debug;

const LOCK_FILE: &str = "lock";

pub struct RepositoryLock {
    _guard: FileGuard<Box<File>>,
}

impl RepositoryLock {
    /// Block until the exclusive lock on the control directory is acquired
    pub fn acquire(control_path: &Path) -> Result<Self> {
        let path = control_path.join(LOCK_FILE);

        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| WitError::RepositoryLocked {
                path: path.clone(),
                source,
            })?;

        let guard = file_guard::lock(Box::new(file), Lock::Exclusive, 0, 1)
            .map_err(|source| WitError::RepositoryLocked {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "repository lock acquired");

        Ok(RepositoryLock { _guard: guard })
    }
}

impl std::fmt::Debug for RepositoryLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryLock").finish_non_exhaustive()
    }
}
