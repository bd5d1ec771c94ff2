//! References and the active branch marker
//!
//! References are human-readable names pointing to commits. `HEAD` is the
//! reserved name for the current position; every other name is a branch.
//!
//! ## File Format
//!
//! `.wit/references.txt` holds one `name=commit-id` line per reference, `HEAD`
//! first and branches in name order. The file does not exist until the first
//! commit, which is the "no commits yet" state.
//!
//! `.wit/activated.txt` holds the name of the checked-out branch, or is empty
//! when `HEAD` is detached.
//!
//! Both files are replaced through a temporary file and an atomic rename, so a
//! reader never observes a partially written file.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::{Result, WitError};
use derive_new::new;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

const REFERENCES_FILE: &str = "references.txt";
const ACTIVATED_FILE: &str = "activated.txt";

/// The full name → commit mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct References {
    head: CommitId,
    branches: BTreeMap<BranchName, CommitId>,
}

impl References {
    /// Mapping written by the first commit: `HEAD` and one branch at the root commit
    pub fn new_root(commit_id: CommitId, branch: BranchName) -> Self {
        References {
            head: commit_id.clone(),
            branches: BTreeMap::from([(branch, commit_id)]),
        }
    }

    pub fn head(&self) -> &CommitId {
        &self.head
    }

    pub fn set_head(&mut self, commit_id: CommitId) {
        self.head = commit_id;
    }

    /// Look up `HEAD` or a branch by name
    pub fn get(&self, name: &str) -> Option<&CommitId> {
        if name == HEAD_REF_NAME {
            return Some(&self.head);
        }

        self.branches
            .iter()
            .find(|(branch, _)| branch.as_ref() == name)
            .map(|(_, commit_id)| commit_id)
    }

    pub fn branch(&self, name: &BranchName) -> Option<&CommitId> {
        self.branches.get(name)
    }

    pub fn set_branch(&mut self, name: BranchName, commit_id: CommitId) {
        self.branches.insert(name, commit_id);
    }

    /// Every reference including `HEAD`, as `(name, commit)` pairs
    pub fn entries(&self) -> Vec<(String, CommitId)> {
        std::iter::once((HEAD_REF_NAME.to_string(), self.head.clone()))
            .chain(
                self.branches
                    .iter()
                    .map(|(name, commit_id)| (name.to_string(), commit_id.clone())),
            )
            .collect()
    }

    /// Whether the given branch currently points at `HEAD`
    pub fn is_at_head(&self, branch: &BranchName) -> bool {
        self.branches.get(branch) == Some(&self.head)
    }

    pub fn serialize(&self) -> String {
        self.entries()
            .into_iter()
            .map(|(name, commit_id)| format!("{name}={commit_id}\n"))
            .collect()
    }

    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let mut head = None;
        let mut branches = BTreeMap::new();

        for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let (name, commit_id) = line
                .split_once('=')
                .ok_or_else(|| format!("expected 'name=commit-id', found '{line}'"))?;
            let commit_id = CommitId::try_parse(commit_id)
                .ok_or_else(|| format!("invalid commit id for '{name}': '{commit_id}'"))?;

            if name == HEAD_REF_NAME {
                head = Some(commit_id);
            } else {
                let branch = BranchName::try_parse(name).map_err(|e| e.to_string())?;
                branches.insert(branch, commit_id);
            }
        }

        let head = head.ok_or_else(|| format!("missing '{HEAD_REF_NAME}' reference"))?;

        Ok(References { head, branches })
    }
}

/// Reference store rooted at the control directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the control directory (typically `.wit`)
    path: Box<Path>,
}

impl Refs {
    pub fn references_path(&self) -> PathBuf {
        self.path.join(REFERENCES_FILE)
    }

    pub fn activated_path(&self) -> PathBuf {
        self.path.join(ACTIVATED_FILE)
    }

    /// Load the reference mapping, or `None` before the first commit
    pub fn load(&self) -> Result<Option<References>> {
        let path = self.references_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        References::parse(&content)
            .map(Some)
            .map_err(|reason| WitError::MalformedMetadata { path, reason })
    }

    /// Load the reference mapping, failing if nothing has been committed yet
    pub fn load_required(&self) -> Result<References> {
        self.load()?
            .ok_or_else(|| WitError::UninitializedRepository("no commits yet".to_string()))
    }

    /// Resolve a single name (`HEAD` or a branch)
    pub fn get(&self, name: &str) -> Result<Option<CommitId>> {
        Ok(self.load_required()?.get(name).cloned())
    }

    /// Persist the full mapping atomically
    pub fn set_all(&self, references: &References) -> Result<()> {
        self.write_atomically(&self.references_path(), &references.serialize())?;

        debug!(head = %references.head(), "references written");

        Ok(())
    }

    /// Read the active branch, `None` when detached
    pub fn active_branch(&self) -> Result<Option<BranchName>> {
        let path = self.activated_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        match BranchName::try_parse(content) {
            Ok(branch) => Ok(Some(branch)),
            Err(e) => {
                warn!("ignoring invalid active branch marker: {}", e);
                Ok(None)
            }
        }
    }

    pub fn set_active_branch(&self, branch: Option<&BranchName>) -> Result<()> {
        let content = branch.map(|branch| branch.to_string()).unwrap_or_default();
        self.write_atomically(&self.activated_path(), &content)?;

        debug!(active_branch = %content, "active branch written");

        Ok(())
    }

    fn write_atomically(&self, path: &Path, content: &str) -> Result<()> {
        let mut file = tempfile::NamedTempFile::new_in(self.path.as_ref())?;
        file.write_all(content.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}
