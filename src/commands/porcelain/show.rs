use crate::areas::repository::Repository;
use crate::artifacts::diff::TreeDiff;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;

impl Repository {
    /// Show a commit (default: HEAD) followed by the diff against its
    /// parent's tree, or the empty tree for a root commit
    pub fn show(&mut self, target: Option<&str>) -> anyhow::Result<()> {
        let oid = match target {
            Some(sha) => {
                let oid = ObjectId::try_parse(sha)?;
                if !self.database().exists(&oid) {
                    return Err(RepoError::NotFound(format!("commit {}", oid)).into());
                }
                oid
            }
            None => self
                .refs()
                .read_head()?
                .ok_or_else(|| RepoError::NotFound("HEAD commit".to_string()))?,
        };

        let commit = self.database().load_commit(&oid)?;

        writeln!(self.writer(), "commit {}", oid)?;
        writeln!(self.writer(), "Author: {}", commit.author().identity())?;
        writeln!(self.writer(), "Date: {}", commit.committer().timestamp_str())?;
        writeln!(self.writer())?;
        for line in commit.message().lines() {
            writeln!(self.writer(), "    {}", line)?;
        }
        writeln!(self.writer())?;

        let parent_tree = match commit.parent() {
            Some(parent) => Some(self.database().load_commit(parent)?.tree_oid().clone()),
            None => None,
        };

        let diff = TreeDiff::new(self.database());
        let mut writer = self.writer();
        diff.print(
            parent_tree.as_ref(),
            Some(commit.tree_oid()),
            "",
            writer.as_mut(),
        )?;

        Ok(())
    }
}
