use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::ancestor::CommonAncestorFinder;
use crate::artifacts::merge::policy::MergePolicy;
use crate::artifacts::objects::commit::CommitMetadata;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::{Result, WitError};
use std::io::Write;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub commit_id: CommitId,
    /// Merge base, `None` for unrelated histories
    pub base: Option<CommitId>,
    /// `false` when local changes kept the working tree as it was
    pub working_tree_synced: bool,
}

impl Repository {
    /// Merge branch `target` into the active branch
    ///
    /// The result tree follows `MergePolicy::TakeTheirs`. It replaces the
    /// staging area and the merge commit is written from there. Every
    /// precondition is checked before anything is written, so a rejected merge
    /// leaves references, staging area and working tree untouched.
    ///
    /// The working tree follows the result only when no local change would be
    /// lost. Otherwise it is left alone and only the stage carries the result.
    pub async fn merge(&self, target: &str) -> Result<MergeOutcome> {
        let _lock = self.lock()?;

        let references = self.refs().load_required()?;
        let head_id = references.head().clone();

        let target_branch = BranchName::try_parse(target)
            .map_err(|_| WitError::UnknownBranch(target.to_string()))?;
        let target_id = references
            .branch(&target_branch)
            .cloned()
            .ok_or_else(|| WitError::UnknownBranch(target.to_string()))?;

        if target_id == head_id {
            return Err(WitError::SameBranchMerge(target.to_string()));
        }

        let active_branch = self.refs().active_branch()?;
        match &active_branch {
            Some(branch) if references.is_at_head(branch) => {}
            _ => {
                return Err(WitError::DetachedOrStaleHeadMerge {
                    active: active_branch.map(|branch| branch.to_string()),
                });
            }
        }

        let base = CommonAncestorFinder::new(|commit_id| self.database().parents(commit_id))
            .find_common_ancestor(&head_id, &target_id)?;
        match &base {
            Some(base) => info!(%base, "merge base found"),
            None => warn!(head = %head_id, target = %target_id, "no common ancestor"),
        }

        let staging_area = self.staging_area();
        let staging_area = staging_area.lock().await;

        let policy = MergePolicy::default();
        let result_snapshot = self
            .database()
            .read(policy.result_source(&head_id, &target_id))?;

        let migration = Migration::plan(&self.database().read(&head_id)?, &result_snapshot)?;
        let pending = migration.pending_changes(staging_area.path(), self.workspace().path())?;
        let working_tree_synced = pending.is_empty();
        if working_tree_synced {
            migration.apply(self.workspace())?;
        } else {
            warn!(
                target,
                paths = pending.paths().len(),
                "local changes kept, working tree not synced"
            );
        }
        staging_area.replace_with(&result_snapshot)?;

        let metadata = CommitMetadata::now(
            vec![head_id.clone(), target_id.clone()],
            format!("merge commit {},{}", head_id, target_id),
        );
        let commit_id = self.write_commit(Some(references), staging_area.path(), &metadata)?;

        writeln!(
            self.writer(),
            "Merged {} into {} as {}",
            target_branch,
            active_branch
                .map(|branch| branch.to_string())
                .unwrap_or_default(),
            commit_id.to_short_id()
        )?;

        if !working_tree_synced {
            let paths = pending
                .paths()
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            eprintln!("warning: working tree left as it was, local changes in: {}", paths);
        }

        Ok(MergeOutcome {
            commit_id,
            base,
            working_tree_synced,
        })
    }
}
