use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::Result;
use std::fs;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Create the control directory layout
    ///
    /// Running it again on an initialized repository changes nothing: existing
    /// references, snapshots, staged files and the active branch are kept.
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(self.path())?;
        fs::create_dir_all(self.database().images_path())?;

        {
            let staging_area = self.staging_area();
            let staging_area = staging_area.lock().await;
            fs::create_dir_all(staging_area.path())?;
        }

        let _lock = self.lock()?;

        if !self.refs().activated_path().exists() {
            self.refs()
                .set_active_branch(Some(&BranchName::default_branch()))?;
        }

        info!(path = %self.path().display(), "repository initialized");

        writeln!(
            self.writer(),
            "Initialized empty wit repository in {}",
            self.control_path().display()
        )?;

        Ok(())
    }
}
