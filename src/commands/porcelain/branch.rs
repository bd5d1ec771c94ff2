use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::Result;
use std::io::Write;
use tracing::{info, warn};

impl Repository {
    /// Point `name` at the current `HEAD`, creating or moving the branch
    ///
    /// Before the first commit there is nothing to point at and the call
    /// changes nothing.
    pub fn branch(&self, name: &str) -> Result<()> {
        let branch_name = BranchName::try_parse(name)?;

        let _lock = self.lock()?;

        let Some(mut references) = self.refs().load()? else {
            warn!(branch = %branch_name, "no commits yet, branch not created");
            writeln!(
                self.writer(),
                "No commits yet, branch '{}' not created",
                branch_name
            )?;
            return Ok(());
        };

        let head = references.head().clone();
        references.set_branch(branch_name.clone(), head.clone());
        self.refs().set_all(&references)?;

        info!(branch = %branch_name, commit = %head, "branch set");

        Ok(())
    }
}
