use crate::areas::repository::Repository;
use crate::artifacts::status::file_state::FileState;
use crate::artifacts::status::inspector::Inspector;
use colored::Colorize;

impl Repository {
    pub fn status(&mut self) -> anyhow::Result<()> {
        let report = Inspector::new(self).report()?;

        match self.refs().read_head()? {
            Some(head) => writeln!(self.writer(), "HEAD commit: {}...", head.to_short_oid())?,
            None => writeln!(self.writer(), "On initial commit")?,
        }
        writeln!(self.writer())?;

        let staged = report.section(FileState::is_staged);
        let unstaged = report.section(FileState::is_unstaged);
        let untracked = report.section(FileState::is_untracked);

        if !staged.is_empty() {
            writeln!(self.writer(), "Changes to be committed:")?;
            writeln!(self.writer(), "  (use \"mygit reset <file>...\" to unstage)")?;
            writeln!(self.writer())?;
            for (path, state) in &staged {
                let line = format!("{:<12}{}", state.label(), path);
                writeln!(self.writer(), "\t{}", line.green())?;
            }
            writeln!(self.writer())?;
        }

        if !unstaged.is_empty() {
            writeln!(self.writer(), "Changes not staged for commit:")?;
            writeln!(
                self.writer(),
                "  (use \"mygit add <file>...\" to update what will be committed)"
            )?;
            writeln!(
                self.writer(),
                "  (use \"mygit checkout -- <file>...\" to discard changes)"
            )?;
            writeln!(self.writer())?;
            for (path, state) in &unstaged {
                let line = format!("{:<12}{}", state.label(), path);
                writeln!(self.writer(), "\t{}", line.red())?;
            }
            writeln!(self.writer())?;
        }

        if !untracked.is_empty() {
            writeln!(self.writer(), "Untracked files:")?;
            writeln!(
                self.writer(),
                "  (use \"mygit add <file>...\" to include in what will be committed)"
            )?;
            writeln!(self.writer())?;
            for (path, _) in &untracked {
                writeln!(self.writer(), "\t{}", path.red())?;
            }
            writeln!(self.writer())?;
        }

        if staged.is_empty() && unstaged.is_empty() && untracked.is_empty() {
            writeln!(self.writer(), "Nothing to commit, working tree clean")?;
        } else if staged.is_empty() {
            writeln!(
                self.writer(),
                "No changes added to commit (use \"mygit add\" to track)"
            )?;
        }

        Ok(())
    }
}
