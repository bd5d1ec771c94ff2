use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::diff::tree_diff::{DiffSides, TreeChangeType, TreeDiff};
use crate::artifacts::objects::commit_id::CommitId;
use crate::artifacts::status::file_change::{FileChangeType, StagedChangeType, WorkingChangeType};
use crate::errors::Result;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub type ChangeSet = BTreeMap<PathBuf, FileChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

/// Where the working tree currently sits in the commit graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// No commit exists yet; the first commit lands on this branch
    Unborn(BranchName),
    OnBranch(BranchName),
    Detached(CommitId),
}

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub(crate) position: Position,
    /// `None` until the first commit exists
    pub(crate) to_be_committed: Option<ChangeSet>,
    pub(crate) not_staged: ChangeSet,
    pub(crate) untracked: FileSet,
}

impl StatusInfo {
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn to_be_committed(&self) -> Option<&ChangeSet> {
        self.to_be_committed.as_ref()
    }

    pub fn not_staged(&self) -> &ChangeSet {
        &self.not_staged
    }

    pub fn untracked(&self) -> &FileSet {
        &self.untracked
    }

    pub fn is_clean(&self) -> bool {
        self.to_be_committed.as_ref().is_none_or(BTreeMap::is_empty)
            && self.not_staged.is_empty()
            && self.untracked.is_empty()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl Status<'_> {
    pub fn inspect(&self, staging_area: &StagingArea) -> Result<StatusInfo> {
        let refs = self.repository.refs();
        let references = refs.load()?;
        let active_branch = refs.active_branch()?;

        let position = match (&references, active_branch) {
            (None, branch) => Position::Unborn(branch.unwrap_or_else(BranchName::default_branch)),
            (Some(_), Some(branch)) => Position::OnBranch(branch),
            (Some(references), None) => Position::Detached(references.head().clone()),
        };

        let to_be_committed = match &references {
            Some(references) => {
                let snapshot = self.repository.database().read(references.head())?;
                Some(Self::staged_changes(&TreeDiff::compare(
                    &snapshot,
                    staging_area.path(),
                )?))
            }
            None => None,
        };

        let working_diff =
            TreeDiff::compare(staging_area.path(), self.repository.workspace().path())?;
        let untracked = working_diff.only_in_b();
        let not_staged = Self::working_changes(
            &working_diff.filter(DiffSides::MODIFIED | DiffSides::ONLY_IN_A),
        );

        Ok(StatusInfo {
            position,
            to_be_committed,
            not_staged,
            untracked,
        })
    }

    fn staged_changes(diff: &TreeDiff) -> ChangeSet {
        diff.changes()
            .iter()
            .map(|(path, change)| {
                let change = match change {
                    TreeChangeType::Modified => StagedChangeType::Modified,
                    TreeChangeType::OnlyInA => StagedChangeType::Deleted,
                    TreeChangeType::OnlyInB => StagedChangeType::Added,
                };
                (path.clone(), FileChangeType::Staged(change))
            })
            .collect()
    }

    fn working_changes(diff: &TreeDiff) -> ChangeSet {
        diff.changes()
            .iter()
            .filter_map(|(path, change)| {
                let change = match change {
                    TreeChangeType::Modified => WorkingChangeType::Modified,
                    TreeChangeType::OnlyInA => WorkingChangeType::Deleted,
                    TreeChangeType::OnlyInB => return None,
                };
                Some((path.clone(), FileChangeType::Working(change)))
            })
            .collect()
    }
}
