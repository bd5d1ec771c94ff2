use crate::areas::refs::References;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::CommitMetadata;
use crate::artifacts::objects::commit_id::CommitId;
use crate::errors::Result;
use std::io::Write;
use std::path::Path;
use tracing::info;

impl Repository {
    pub async fn commit(&self, message: &str) -> Result<CommitId> {
        let _lock = self.lock()?;

        let staging_area = self.staging_area();
        let staging_area = staging_area.lock().await;

        let references = self.refs().load()?;
        let is_root = match references {
            Some(_) => "",
            None => "(root-commit) ",
        };
        let parents = references
            .as_ref()
            .map(|references| vec![references.head().clone()])
            .unwrap_or_default();

        let metadata = CommitMetadata::now(parents, message.trim().to_string());
        let commit_id = self.write_commit(references, staging_area.path(), &metadata)?;

        writeln!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_id.to_short_id(),
            metadata.short_message()
        )?;

        Ok(commit_id)
    }

    /// Store `source_tree` as a new commit and move the references onto it
    ///
    /// `HEAD` always moves. The active branch follows only when it pointed at
    /// `HEAD` before the commit; the very first commit creates it.
    pub(crate) fn write_commit(
        &self,
        references: Option<References>,
        source_tree: &Path,
        metadata: &CommitMetadata,
    ) -> Result<CommitId> {
        let active_branch = self.refs().active_branch()?;

        let commit_id = self.database().allocate_id();
        self.database().create(&commit_id, source_tree, metadata)?;

        let references = match references {
            None => {
                let branch = match active_branch {
                    Some(branch) => branch,
                    None => {
                        let branch = BranchName::default_branch();
                        self.refs().set_active_branch(Some(&branch))?;
                        branch
                    }
                };
                References::new_root(commit_id.clone(), branch)
            }
            Some(mut references) => {
                if let Some(branch) = active_branch
                    && references.is_at_head(&branch)
                {
                    references.set_branch(branch, commit_id.clone());
                }
                references.set_head(commit_id.clone());
                references
            }
        };

        self.refs().set_all(&references)?;

        info!(%commit_id, message = metadata.short_message(), "commit written");

        Ok(commit_id)
    }
}
