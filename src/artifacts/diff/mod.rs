//! Tree diffing for `show`
//!
//! Walks the union of two trees' entries, classifying each name as added,
//! deleted, or modified, and prints a unified-diff-style preamble followed
//! by a trivial line dump: all old lines prefixed `-`, then all new lines
//! prefixed `+`. Sub-trees recurse with an extended path prefix.

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

#[derive(new)]
pub struct TreeDiff<'d> {
    database: &'d Database,
}

impl TreeDiff<'_> {
    /// Print the diff between two trees; `None` stands for the empty tree
    pub fn print(
        &self,
        old_tree: Option<&ObjectId>,
        new_tree: Option<&ObjectId>,
        prefix: &str,
        writer: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let old_entries = self.entries_of(old_tree)?;
        let new_entries = self.entries_of(new_tree)?;

        let names = old_entries
            .keys()
            .chain(new_entries.keys())
            .collect::<BTreeSet<_>>();

        for name in names {
            let full_path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", prefix, name)
            };

            match (old_entries.get(name), new_entries.get(name)) {
                (None, Some(new)) => self.print_added(new, &full_path, writer)?,
                (Some(old), None) => self.print_deleted(old, &full_path, writer)?,
                (Some(old), Some(new)) if old.oid() != new.oid() => {
                    match (old.mode().object_type(), new.mode().object_type()) {
                        (ObjectType::Blob, ObjectType::Blob) => {
                            self.print_modified(old, new, &full_path, writer)?
                        }
                        (ObjectType::Tree, ObjectType::Tree) => {
                            self.print(Some(old.oid()), Some(new.oid()), &full_path, writer)?
                        }
                        // kind changed between blob and tree; not diffed
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn entries_of(&self, tree: Option<&ObjectId>) -> anyhow::Result<BTreeMap<String, TreeEntry>> {
        let tree = match tree {
            Some(oid) => self.database.load_tree(oid)?,
            None => Tree::empty(),
        };

        Ok(tree
            .entries()
            .iter()
            .map(|entry| (entry.name().to_string(), entry.clone()))
            .collect())
    }

    fn print_added(
        &self,
        entry: &TreeEntry,
        full_path: &str,
        writer: &mut dyn Write,
    ) -> anyhow::Result<()> {
        if entry.mode().object_type() != ObjectType::Blob {
            return self.print(None, Some(entry.oid()), full_path, writer);
        }

        writeln!(writer, "diff --git a/{0} b/{0}", full_path)?;
        writeln!(writer, "new file mode {}", entry.mode())?;
        writeln!(writer, "index 0000000..{}", &entry.oid().as_ref()[..7])?;
        writeln!(writer, "--- /dev/null")?;
        writeln!(writer, "+++ b/{}", full_path)?;
        self.print_blob_lines(entry.oid(), '+', writer)?;

        Ok(())
    }

    fn print_deleted(
        &self,
        entry: &TreeEntry,
        full_path: &str,
        writer: &mut dyn Write,
    ) -> anyhow::Result<()> {
        if entry.mode().object_type() != ObjectType::Blob {
            return self.print(Some(entry.oid()), None, full_path, writer);
        }

        writeln!(writer, "diff --git a/{0} b/{0}", full_path)?;
        writeln!(writer, "deleted file mode {}", entry.mode())?;
        writeln!(writer, "index {}..0000000", &entry.oid().as_ref()[..7])?;
        writeln!(writer, "--- a/{}", full_path)?;
        writeln!(writer, "+++ /dev/null")?;
        self.print_blob_lines(entry.oid(), '-', writer)?;

        Ok(())
    }

    fn print_modified(
        &self,
        old: &TreeEntry,
        new: &TreeEntry,
        full_path: &str,
        writer: &mut dyn Write,
    ) -> anyhow::Result<()> {
        writeln!(writer, "diff --git a/{0} b/{0}", full_path)?;
        writeln!(
            writer,
            "index {}..{} {}",
            &old.oid().as_ref()[..7],
            &new.oid().as_ref()[..7],
            new.mode()
        )?;
        writeln!(writer, "--- a/{}", full_path)?;
        writeln!(writer, "+++ b/{}", full_path)?;
        self.print_blob_lines(old.oid(), '-', writer)?;
        self.print_blob_lines(new.oid(), '+', writer)?;

        Ok(())
    }

    fn print_blob_lines(
        &self,
        oid: &ObjectId,
        sign: char,
        writer: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let blob = self.database.load_blob(oid)?;
        let content = String::from_utf8_lossy(blob.content());

        for line in content.lines() {
            writeln!(writer, "{}{}", sign, line)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use crate::artifacts::objects::entry_mode::EntryMode;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    fn temp_database() -> (assert_fs::TempDir, Database) {
        let dir = assert_fs::TempDir::new().expect("failed to create temp dir");
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        (dir, database)
    }

    fn store_blob(database: &Database, content: &str) -> ObjectId {
        database
            .store(&Blob::new(Bytes::copy_from_slice(content.as_bytes())))
            .unwrap()
    }

    fn store_tree(database: &Database, entries: Vec<TreeEntry>) -> ObjectId {
        database.store(&Tree::new(entries).unwrap()).unwrap()
    }

    fn diff_output(
        database: &Database,
        old_tree: Option<&ObjectId>,
        new_tree: Option<&ObjectId>,
    ) -> String {
        let mut output = Vec::new();
        TreeDiff::new(database)
            .print(old_tree, new_tree, "", &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn root_commit_diff_marks_every_line_added() {
        let (_dir, database) = temp_database();

        let blob_oid = store_blob(&database, "hello\n");
        let tree_oid = store_tree(
            &database,
            vec![TreeEntry::new(
                EntryMode::Regular,
                "a.txt".into(),
                blob_oid.clone(),
            )],
        );

        let output = diff_output(&database, None, Some(&tree_oid));
        let expected = format!(
            "diff --git a/a.txt b/a.txt\n\
             new file mode 100644\n\
             index 0000000..{}\n\
             --- /dev/null\n\
             +++ b/a.txt\n\
             +hello\n",
            &blob_oid.as_ref()[..7]
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn modified_blob_dumps_old_then_new_lines() {
        let (_dir, database) = temp_database();

        let old_blob = store_blob(&database, "one\ntwo\n");
        let new_blob = store_blob(&database, "one\nthree\n");
        let old_tree = store_tree(
            &database,
            vec![TreeEntry::new(EntryMode::Regular, "a.txt".into(), old_blob)],
        );
        let new_tree = store_tree(
            &database,
            vec![TreeEntry::new(EntryMode::Regular, "a.txt".into(), new_blob)],
        );

        let output = diff_output(&database, Some(&old_tree), Some(&new_tree));
        assert!(output.contains("-one\n-two\n+one\n+three\n"));
    }

    #[test]
    fn nested_trees_recurse_with_extended_prefix() {
        let (_dir, database) = temp_database();

        let old_blob = store_blob(&database, "old\n");
        let new_blob = store_blob(&database, "new\n");
        let old_sub = store_tree(
            &database,
            vec![TreeEntry::new(EntryMode::Regular, "b.txt".into(), old_blob)],
        );
        let new_sub = store_tree(
            &database,
            vec![TreeEntry::new(EntryMode::Regular, "b.txt".into(), new_blob)],
        );
        let old_tree = store_tree(
            &database,
            vec![TreeEntry::new(EntryMode::Directory, "dir".into(), old_sub)],
        );
        let new_tree = store_tree(
            &database,
            vec![TreeEntry::new(EntryMode::Directory, "dir".into(), new_sub)],
        );

        let output = diff_output(&database, Some(&old_tree), Some(&new_tree));
        assert!(output.contains("diff --git a/dir/b.txt b/dir/b.txt"));
    }

    #[test]
    fn identical_trees_produce_no_output() {
        let (_dir, database) = temp_database();

        let blob_oid = store_blob(&database, "same\n");
        let tree_oid = store_tree(
            &database,
            vec![TreeEntry::new(EntryMode::Regular, "a.txt".into(), blob_oid)],
        );

        assert_eq!(diff_output(&database, Some(&tree_oid), Some(&tree_oid)), "");
    }

    #[test]
    fn deleted_blob_is_dumped_with_minus_lines() {
        let (_dir, database) = temp_database();

        let blob_oid = store_blob(&database, "gone\n");
        let tree_oid = store_tree(
            &database,
            vec![TreeEntry::new(EntryMode::Regular, "a.txt".into(), blob_oid)],
        );

        let output = diff_output(&database, Some(&tree_oid), None);
        assert!(output.contains("deleted file mode 100644"));
        assert!(output.contains("+++ /dev/null"));
        assert!(output.contains("-gone\n"));
    }
}
