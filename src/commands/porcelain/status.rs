use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{ChangeSet, Position, Status, StatusInfo};
use crate::errors::Result;
use colored::Colorize;
use std::io::Write;

const INDENT: &str = "        ";

impl Repository {
    pub async fn status(&self) -> Result<StatusInfo> {
        self.ensure_initialized()?;

        let staging_area = self.staging_area();
        let staging_area = staging_area.lock().await;

        let status_info = Status::new(self).inspect(&staging_area)?;
        self.print_status(&status_info)?;

        Ok(status_info)
    }

    fn print_status(&self, status_info: &StatusInfo) -> Result<()> {
        let mut writer = self.writer();

        match status_info.position() {
            Position::Unborn(branch) => {
                writeln!(writer, "On branch {}\n\nNo commits yet", branch)?;
            }
            Position::OnBranch(branch) => writeln!(writer, "On branch {}", branch)?,
            Position::Detached(commit_id) => writeln!(
                writer,
                "{} {}",
                "HEAD detached at".red(),
                commit_id.to_short_id()
            )?,
        }

        writeln!(writer, "\nChanges to be committed:")?;
        match status_info.to_be_committed() {
            Some(changes) => Self::print_changes(&mut *writer, changes)?,
            None => writeln!(writer, "{}nothing committed yet", INDENT)?,
        }

        writeln!(writer, "\nChanges not staged for commit:")?;
        Self::print_changes(&mut *writer, status_info.not_staged())?;

        writeln!(writer, "\nUntracked files:")?;
        for path in status_info.untracked() {
            writeln!(
                writer,
                "{}{}",
                INDENT,
                path.display().to_string().red()
            )?;
        }

        Ok(())
    }

    fn print_changes(writer: &mut dyn Write, changes: &ChangeSet) -> Result<()> {
        for (path, change) in changes {
            writeln!(writer, "{}{}", change, path.display())?;
        }

        Ok(())
    }
}
