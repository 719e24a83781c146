use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::errors::RepoError;
use std::path::Path;

impl Repository {
    /// Stage files: a file argument stages it, a directory argument stages
    /// it recursively, and `.` stages the whole working tree. Hidden paths
    /// are skipped; an explicitly named missing path is an error.
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        for raw in paths {
            if raw == "." {
                for path in self.workspace().list_files(None)? {
                    self.stage_file(&path)?;
                }
                continue;
            }

            let path = Path::new(raw);
            if Workspace::is_hidden(path) {
                writeln!(self.writer(), "Skipping hidden path: {}", raw)?;
                continue;
            }

            if self.workspace().is_file(path) {
                self.stage_file(path)?;
            } else if self.workspace().is_dir(path) {
                for path in self.workspace().list_files(Some(path))? {
                    self.stage_file(&path)?;
                }
            } else {
                return Err(RepoError::NotFound(format!("path '{}'", raw)).into());
            }
        }

        Ok(())
    }

    fn stage_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = self.workspace().read_file(path)?;
        let oid = self.database().store(&Blob::new(content))?;

        let normalized = Workspace::normalize(path);
        self.index().append(&normalized, &oid, EntryMode::Regular)?;

        writeln!(self.writer(), "Added to staging area: {}", normalized)?;

        Ok(())
    }
}
