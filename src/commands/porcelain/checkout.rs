use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepoError;
use std::path::Path;

impl Repository {
    /// Restore a commit's tree into the working directory and move HEAD
    ///
    /// The index is deliberately left alone; pair with `reset` for a clean
    /// staging area.
    pub fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(target)?;
        if !self.database().exists(&oid) {
            return Err(RepoError::NotFound(format!("commit {}", oid)).into());
        }

        let commit = self.database().load_commit(&oid)?;

        self.workspace().clear();
        self.restore_tree(commit.tree_oid(), Path::new(""))?;
        self.refs().write_head(&oid)?;

        writeln!(self.writer(), "HEAD is now at {}", oid.to_short_oid())?;

        Ok(())
    }

    /// Extract a tree into `dest`: blobs are written binary-exact with
    /// parent directories created first (flat slash-named entries rely on
    /// this), sub-trees recurse
    pub(crate) fn restore_tree(&self, tree_oid: &ObjectId, dest: &Path) -> anyhow::Result<()> {
        let tree = self.database().load_tree(tree_oid)?;

        for entry in tree.entries() {
            let target = dest.join(entry.name());

            match entry.mode().object_type() {
                ObjectType::Blob => {
                    let blob = self.database().load_blob(entry.oid())?;
                    self.workspace().write_file(&target, blob.content())?;
                }
                _ => {
                    self.workspace().make_dir(&target)?;
                    self.restore_tree(entry.oid(), &target)?;
                }
            }
        }

        Ok(())
    }
}
