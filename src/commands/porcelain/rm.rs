use crate::areas::repository::Repository;
use crate::errors::{Result, WitError};
use tracing::info;

impl Repository {
    /// Drop paths from the staging area, leaving the working tree alone
    pub async fn rm(&self, paths: &[String]) -> Result<()> {
        let _lock = self.lock()?;

        let staging_area = self.staging_area();
        let staging_area = staging_area.lock().await;

        let paths = paths
            .iter()
            .map(|path| self.workspace().lexical_relative_path(path))
            .collect::<Result<Vec<_>>>()?;

        if let Some(missing) = paths.iter().find(|path| !staging_area.is_staged(path)) {
            return Err(WitError::PathNotFound(missing.clone()));
        }

        for path in paths {
            staging_area.unstage(&path)?;
            info!(path = %path.display(), "removed from staging area");
        }

        Ok(())
    }
}
