use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{GitletError, NO_COMMIT_WITH_MESSAGE};
use colored::Colorize;
use std::io::Write;

const COMMIT_SEPARATOR: &str = "===";

impl Repository {
    /// Show the history of the checked-out branch, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let staging = self.load_staging()?;

        for entry in RevList::new(self, staging.branch().commit().clone()) {
            let (commit_oid, commit) = entry?;
            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Show every commit ever made, in commit store order
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.load_staging()?;

        for commit_oid in self.commits().list()? {
            let commit = self.commits().parse_object_as_commit(&commit_oid)?;
            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Print the ids of all commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.load_staging()?;

        let mut found = false;

        for commit_oid in self.commits().list()? {
            let commit = self.commits().parse_object_as_commit(&commit_oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", commit_oid)?;
                found = true;
            }
        }

        if !found {
            return Err(GitletError::not_found(NO_COMMIT_WITH_MESSAGE).into());
        }

        Ok(())
    }

    fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", COMMIT_SEPARATOR)?;
        writeln!(
            self.writer(),
            "{}",
            format!("commit {}", commit_oid).as_str().yellow()
        )?;
        writeln!(
            self.writer(),
            "Date: {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
