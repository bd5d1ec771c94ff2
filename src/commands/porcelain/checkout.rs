use crate::areas::refs::{HEAD_REF_NAME, References};
use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::PendingChanges;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::{Result, WitError};
use std::io::Write;
use tracing::{info, warn};

const DETACHMENT_NOTICE: &str = r#"
You are in 'detached HEAD' state. You can look around, make experimental
changes and commit them, and you can discard any commits you make in this
state without impacting any branches by performing another checkout.

If you want to create a new branch to retain commits you create, you may
do so (now or later) by using the branch command. Example:

    wit branch <new-branch-name>
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Switched {
        commit_id: CommitId,
        /// `None` when `HEAD` is now detached
        branch: Option<BranchName>,
    },
    /// Pending changes would be lost; nothing was modified
    Blocked(PendingChanges),
}

impl Repository {
    pub async fn checkout(&self, target: &str) -> Result<CheckoutOutcome> {
        let _lock = self.lock()?;

        let mut references = self.refs().load_required()?;
        let (target_id, branch) = self.resolve_checkout_target(&references, target)?;

        let staging_area = self.staging_area();
        let staging_area = staging_area.lock().await;

        let pending = self.migrate(&staging_area, references.head(), &target_id)?;
        if !pending.is_empty() {
            warn!(target, paths = pending.paths().len(), "checkout blocked");
            self.print_pending_changes(&pending);
            return Ok(CheckoutOutcome::Blocked(pending));
        }

        let was_detached = self.refs().active_branch()?.is_none();

        references.set_head(target_id.clone());
        self.refs().set_all(&references)?;
        self.refs().set_active_branch(branch.as_ref())?;

        info!(commit = %target_id, branch = ?branch, "checked out");

        match &branch {
            Some(branch) => writeln!(self.writer(), "Switched to branch '{}'", branch)?,
            None => {
                if !was_detached {
                    eprintln!("Note: checking out '{}'.\n{}", target, DETACHMENT_NOTICE);
                }
                let message = self.database().metadata(&target_id)?;
                writeln!(
                    self.writer(),
                    "HEAD is now at {} {}",
                    target_id.to_short_id(),
                    message.short_message()
                )?;
            }
        }

        Ok(CheckoutOutcome::Switched {
            commit_id: target_id,
            branch,
        })
    }

    /// Resolve a checkout argument to a commit and the branch it activates
    ///
    /// Reference names win over commit ids. `HEAD` keeps the active branch.
    fn resolve_checkout_target(
        &self,
        references: &References,
        target: &str,
    ) -> Result<(CommitId, Option<BranchName>)> {
        if target == HEAD_REF_NAME {
            return Ok((references.head().clone(), self.refs().active_branch()?));
        }

        if let Some(commit_id) = references.get(target) {
            let branch = BranchName::try_parse(target)?;
            return Ok((commit_id.clone(), Some(branch)));
        }

        match CommitId::try_parse(target) {
            Some(commit_id) if self.database().contains(&commit_id) => Ok((commit_id, None)),
            _ => Err(WitError::UnresolvableReference(target.to_string())),
        }
    }

    /// Move the working tree and staging area from one snapshot to another
    ///
    /// Returns the pending changes that block the move. When that set is
    /// non-empty nothing has been touched.
    pub(crate) fn migrate(
        &self,
        staging_area: &StagingArea,
        from: &CommitId,
        to: &CommitId,
    ) -> Result<PendingChanges> {
        let current_snapshot = self.database().read(from)?;
        let target_snapshot = self.database().read(to)?;

        let migration = Migration::plan(&current_snapshot, &target_snapshot)?;
        let pending = migration.pending_changes(staging_area.path(), self.workspace().path())?;
        if !pending.is_empty() {
            return Ok(pending);
        }

        migration.apply(self.workspace())?;
        staging_area.replace_with(&target_snapshot)?;

        Ok(pending)
    }

    pub(crate) fn print_pending_changes(&self, pending: &PendingChanges) {
        let errors = pending
            .messages()
            .iter()
            .map(|e| format!("error: {}", e))
            .collect::<Vec<_>>()
            .join("\n\n");
        eprintln!("\n{}\n\nAborting", errors);
    }
}
