use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use anyhow::Context;
use std::path::Path;

impl Repository {
    pub fn write_tree(&mut self) -> anyhow::Result<()> {
        let oid = self.snapshot_directory(Path::new(""))?;
        writeln!(self.writer(), "{}", oid)?;

        Ok(())
    }

    /// Materialize a directory into a nested tree object
    ///
    /// Walks `dir` skipping hidden entries: regular files become blobs
    /// (mode 100644), subdirectories recurse into subtrees (mode 40000).
    /// Entries are sorted by name, so an unchanged directory always
    /// produces the same hash.
    pub(crate) fn snapshot_directory(&self, dir: &Path) -> anyhow::Result<ObjectId> {
        let mut entries = Vec::new();

        for path in self.workspace().list_entries(dir)? {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .with_context(|| format!("invalid entry name in {}", path.display()))?;

            if self.workspace().is_file(&path) {
                let content = self.workspace().read_file(&path)?;
                let blob_oid = self.database().store(&Blob::new(content))?;
                entries.push(TreeEntry::new(EntryMode::Regular, name, blob_oid));
            } else if self.workspace().is_dir(&path) {
                let subtree_oid = self.snapshot_directory(&path)?;
                entries.push(TreeEntry::new(EntryMode::Directory, name, subtree_oid));
            }
            // symlinks and other special files are out of scope
        }

        let tree = Tree::new(entries)?;
        self.database().store(&tree)
    }
}
