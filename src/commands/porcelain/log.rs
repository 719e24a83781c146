use crate::areas::repository::Repository;

impl Repository {
    /// Print the history from `logs/HEAD`, newest first
    pub fn log(&mut self) -> anyhow::Result<()> {
        if !self.refs().log_path().exists() {
            writeln!(self.writer(), "No commits found (log file doesn't exist).")?;
            return Ok(());
        }

        let records = self.refs().read_log()?;
        if records.is_empty() {
            writeln!(self.writer(), "No commits found.")?;
            return Ok(());
        }

        for record in records.iter().rev() {
            writeln!(self.writer(), "Commit: {}", record.commit)?;
            if let Some(parent) = &record.parent {
                writeln!(self.writer(), "Parent: {}", parent)?;
            }
            writeln!(self.writer(), "Committer: {}", record.committer)?;
            writeln!(self.writer(), "Date: {}", record.date)?;
            writeln!(self.writer(), "Message: {}", record.message)?;
            writeln!(self.writer())?;
        }

        Ok(())
    }
}
