use crate::areas::repository::Repository;
use crate::errors::Result;
use tracing::info;

impl Repository {
    pub async fn add(&self, paths: &[String]) -> Result<()> {
        let _lock = self.lock()?;

        // resolve everything first so a bad path stages nothing
        let paths = paths
            .iter()
            .map(|path| self.workspace().relative_path(path))
            .collect::<Result<Vec<_>>>()?;

        let staging_area = self.staging_area();
        let staging_area = staging_area.lock().await;

        for path in paths {
            let staged = staging_area.stage(self.workspace().path(), &path)?;
            info!(path = %path.display(), files = staged, "added to staging area");
        }

        Ok(())
    }
}
