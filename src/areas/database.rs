//! Snapshot store
//!
//! Every commit owns a full copy of the staged tree under `images/<id>/` and a
//! metadata record under `images/<id>.txt`. Nothing is shared between commits:
//! storage grows with the full tree size on every commit.
//!
//! ## Crash safety
//!
//! A snapshot is copied into `images/.tmp-<id>/` first, renamed into place, and
//! only then is its metadata file written (atomically). A commit exists only
//! when both the directory and the metadata file exist, so an interrupted copy
//! can never be mistaken for a valid snapshot.

use crate::artifacts::core::fs_tree;
use crate::artifacts::objects::commit::CommitMetadata;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::{Result, WitError};
use derive_new::new;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const TMP_PREFIX: &str = ".tmp-";
const METADATA_EXTENSION: &str = "txt";

#[derive(Debug, new)]
pub struct Database {
    /// Path to the snapshot directory (typically `.wit/images`)
    path: Box<Path>,
}

impl Database {
    pub fn images_path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot_path(&self, commit_id: &CommitId) -> PathBuf {
        self.path.join(commit_id.as_ref())
    }

    pub fn metadata_path(&self, commit_id: &CommitId) -> PathBuf {
        self.path
            .join(commit_id.as_ref())
            .with_extension(METADATA_EXTENSION)
    }

    fn staging_path(&self, commit_id: &CommitId) -> PathBuf {
        self.path.join(format!("{TMP_PREFIX}{commit_id}"))
    }

    /// Whether a complete snapshot (directory and metadata) exists for `commit_id`
    pub fn contains(&self, commit_id: &CommitId) -> bool {
        self.snapshot_path(commit_id).is_dir() && self.metadata_path(commit_id).is_file()
    }

    /// Draw a commit id not used by any stored or in-flight snapshot
    pub fn allocate_id(&self) -> CommitId {
        loop {
            let commit_id = CommitId::generate();

            if self.snapshot_path(&commit_id).exists()
                || self.metadata_path(&commit_id).exists()
                || self.staging_path(&commit_id).exists()
            {
                warn!(%commit_id, "commit id collision, drawing a new one");
                continue;
            }

            return commit_id;
        }
    }

    /// Store a full copy of `source_tree` and its metadata under `commit_id`
    pub fn create(
        &self,
        commit_id: &CommitId,
        source_tree: &Path,
        metadata: &CommitMetadata,
    ) -> Result<()> {
        let staging_path = self.staging_path(commit_id);
        let snapshot_path = self.snapshot_path(commit_id);

        // leftovers of an interrupted attempt
        if staging_path.exists() {
            std::fs::remove_dir_all(&staging_path)?;
        }

        let result = fs_tree::copy_tree(source_tree, &staging_path);
        if let Err(e) = result {
            // never leave a half written snapshot behind
            let _ = std::fs::remove_dir_all(&staging_path);
            return Err(e);
        }

        std::fs::rename(&staging_path, &snapshot_path)
            .map_err(|e| WitError::copy_failure(&staging_path, &snapshot_path, e))?;

        let mut metadata_file = tempfile::NamedTempFile::new_in(self.path.as_ref())?;
        metadata_file.write_all(metadata.serialize().as_bytes())?;
        metadata_file.as_file().sync_all()?;
        metadata_file
            .persist(self.metadata_path(commit_id))
            .map_err(|e| e.error)?;

        info!(%commit_id, parents = metadata.parents().len(), "snapshot created");

        Ok(())
    }

    /// Read the metadata record of a stored commit
    pub fn metadata(&self, commit_id: &CommitId) -> Result<CommitMetadata> {
        if !self.contains(commit_id) {
            return Err(WitError::UnresolvableReference(commit_id.to_string()));
        }

        let path = self.metadata_path(commit_id);
        let content = std::fs::read_to_string(&path)?;

        CommitMetadata::parse(&content)
            .map_err(|reason| WitError::MalformedMetadata { path, reason })
    }

    /// Parents of a stored commit, the edge loader for graph walks
    pub fn parents(&self, commit_id: &CommitId) -> Result<Vec<CommitId>> {
        Ok(self.metadata(commit_id)?.parents().to_vec())
    }

    /// Path to the snapshot tree of a stored commit
    pub fn read(&self, commit_id: &CommitId) -> Result<PathBuf> {
        if !self.contains(commit_id) {
            return Err(WitError::UnresolvableReference(commit_id.to_string()));
        }

        debug!(%commit_id, "reading snapshot");

        Ok(self.snapshot_path(commit_id))
    }
}
