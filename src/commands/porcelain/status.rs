use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let staging = self.load_staging()?;
        let status_info = Status::new(self).initialize(&staging)?;

        self.print_branches(&status_info)?;
        self.print_section(
            "Staged Files",
            status_info
                .staged_files
                .iter()
                .map(|file| file.display().to_string().as_str().green().to_string()),
        )?;
        self.print_section(
            "Removed Files",
            status_info
                .removed_files
                .iter()
                .map(|file| file.display().to_string().as_str().red().to_string()),
        )?;
        self.print_section(
            "Modifications Not Staged For Commit",
            status_info
                .workspace_changeset
                .iter()
                .map(|(file, change)| format!("{} ({})", file.display(), change.colored_label())),
        )?;
        self.print_section(
            "Untracked Files",
            status_info
                .untracked_files
                .iter()
                .map(|file| file.display().to_string()),
        )?;

        Ok(())
    }

    fn print_branches(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        self.print_section(
            "Branches",
            status_info.branches.iter().map(|branch| {
                if *branch == status_info.current_branch {
                    format!("*{}", branch).as_str().green().to_string()
                } else {
                    branch.to_string()
                }
            }),
        )
    }

    fn print_section(
        &self,
        title: &str,
        lines: impl Iterator<Item = String>,
    ) -> anyhow::Result<()> {
        writeln!(self.writer(), "=== {} ===", title)?;
        for line in lines {
            writeln!(self.writer(), "{}", line)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
