//! Merge result policy
//!
//! There is no per-file three-way comparison. The result tree of a merge is
//! chosen wholesale by the policy below, and conflicting files are never
//! signalled.

use crate::artifacts::objects::commit_id::CommitId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// The merged branch's tip snapshot becomes the result tree unchanged
    #[default]
    TakeTheirs,
}

impl MergePolicy {
    /// Commit whose snapshot becomes the merge result
    pub fn result_source<'a>(&self, _ours: &'a CommitId, theirs: &'a CommitId) -> &'a CommitId {
        match self {
            MergePolicy::TakeTheirs => theirs,
        }
    }
}
