use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepoError;

impl Repository {
    /// Create a commit from the staged entries
    ///
    /// Ordering matters here: every object is written first, then the log
    /// line, then `HEAD` and `master`, and the index is truncated only
    /// after the new commit is visible in `HEAD`.
    pub fn commit(&mut self, message: Option<&str>) -> anyhow::Result<()> {
        let message = match message {
            Some(message) => message.to_string(),
            None => {
                writeln!(self.writer(), "No commit message provided, using default.")?;
                "Default commit message".to_string()
            }
        };

        let entries = self.index().load()?;
        if entries.is_empty() {
            return Err(RepoError::NothingToCommit.into());
        }

        let tree = Tree::from_index_entries(
            entries
                .into_iter()
                .map(|(path, entry)| (path, entry.mode, entry.oid)),
        );
        let tree_oid = self.database().store(&tree)?;

        let parent = self.refs().read_head()?;
        let author = Author::author();
        let committer = Author::committer();

        let commit = Commit::new(
            parent.clone(),
            tree_oid,
            author,
            committer.clone(),
            message.clone(),
        );
        let commit_oid = self.database().store(&commit)?;

        self.refs()
            .append_log(parent.as_ref(), &commit_oid, &committer, &message)?;
        self.refs().write_head(&commit_oid)?;
        self.refs().update_master(&commit_oid)?;
        self.index().clear()?;

        writeln!(self.writer(), "{}", commit_oid)?;

        Ok(())
    }
}
