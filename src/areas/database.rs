//! Object database
//!
//! Content-addressable storage for blobs, trees, and commits under
//! `.mygit/objects`. Objects are written zlib-compressed at
//! `objects/<first-2-hex>/<remaining-38-hex>`; the decompressed content is
//! the canonical `<kind> <size>\0<payload>` form whose SHA-1 is the
//! object's name.
//!
//! The database owns the framing: `store` assembles it, `load` strips and
//! verifies it, and the object codecs in `artifacts::objects` only ever
//! see payloads.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{FromPayload, Object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepoError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

/// Content-addressed object store
#[derive(Debug)]
pub struct Database {
    /// Path to the objects directory (`.mygit/objects`)
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store an object, returning its id
    ///
    /// Deterministic and idempotent: identical content produces the same
    /// id, and an object file that already exists is left untouched.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let oid = object.object_id()?;
        let object_path = self.path.join(oid.to_path());

        if !object_path.exists() {
            self.write_object(&object_path, object.framed()?)?;
        }

        Ok(oid)
    }

    pub fn exists(&self, oid: &ObjectId) -> bool {
        self.path.join(oid.to_path()).exists()
    }

    /// Load an object, verifying its framing
    ///
    /// Splits the decompressed content at the first NUL, parses
    /// `<kind> <size>`, and checks the declared size against the payload.
    pub fn load(&self, oid: &ObjectId) -> anyhow::Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(oid.to_path());
        if !object_path.exists() {
            return Err(RepoError::NotFound(format!("object {}", oid)).into());
        }

        let compressed = std::fs::read(&object_path)
            .map_err(|e| RepoError::io(&object_path, e))?;
        let content = Self::decompress(compressed.into())
            .map_err(|e| RepoError::corrupt(oid, format!("decompression failed: {e}")))?;

        let nul = content
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| RepoError::corrupt(oid, "missing header terminator"))?;
        let header = std::str::from_utf8(&content[..nul])
            .map_err(|_| RepoError::corrupt(oid, "header is not UTF-8"))?;

        let (kind, size) = header
            .split_once(' ')
            .ok_or_else(|| RepoError::corrupt(oid, format!("malformed header '{header}'")))?;
        let object_type = ObjectType::try_from(kind)
            .map_err(|_| RepoError::corrupt(oid, format!("unknown object kind '{kind}'")))?;
        let declared = size
            .parse::<usize>()
            .map_err(|_| RepoError::corrupt(oid, format!("malformed size '{size}'")))?;

        let payload = content.slice(nul + 1..);
        if payload.len() != declared {
            return Err(RepoError::corrupt(
                oid,
                format!("size mismatch: header says {declared}, payload is {}", payload.len()),
            )
            .into());
        }

        Ok((object_type, payload))
    }

    /// The kind of an object, without keeping its payload
    pub fn object_type(&self, oid: &ObjectId) -> anyhow::Result<ObjectType> {
        Ok(self.load(oid)?.0)
    }

    /// Load an object that must be a blob
    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let (object_type, payload) = self.load(oid)?;
        match object_type {
            ObjectType::Blob => Ok(Blob::decode(payload)?),
            other => Err(RepoError::corrupt(oid, format!("expected blob, found {other}")).into()),
        }
    }

    /// Load an object that must be a tree
    pub fn load_tree(&self, oid: &ObjectId) -> anyhow::Result<Tree> {
        let (object_type, payload) = self.load(oid)?;
        match object_type {
            ObjectType::Tree => {
                Tree::decode(payload).map_err(|e| RepoError::corrupt(oid, e.to_string()).into())
            }
            other => Err(RepoError::corrupt(oid, format!("expected tree, found {other}")).into()),
        }
    }

    /// Load an object that must be a commit
    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, payload) = self.load(oid)?;
        match object_type {
            ObjectType::Commit => {
                Commit::decode(payload).map_err(|e| RepoError::corrupt(oid, e.to_string()).into())
            }
            other => Err(RepoError::corrupt(oid, format!("expected commit, found {other}")).into()),
        }
    }

    /// Collect every blob reachable from a tree, keyed by slash-joined path
    ///
    /// Handles both the nested trees written by the directory walk and the
    /// flat slash-named trees written at commit time.
    pub fn tree_files(
        &self,
        tree_oid: &ObjectId,
        prefix: &str,
        files: &mut BTreeMap<String, ObjectId>,
    ) -> anyhow::Result<()> {
        let tree = self.load_tree(tree_oid)?;

        for entry in tree.entries() {
            let full_path = if prefix.is_empty() {
                entry.name().to_string()
            } else {
                format!("{}/{}", prefix, entry.name())
            };

            match entry.mode().object_type() {
                ObjectType::Blob => {
                    files.insert(full_path, entry.oid().clone());
                }
                _ => self.tree_files(entry.oid(), &full_path, files)?,
            }
        }

        Ok(())
    }

    fn write_object(&self, object_path: &Path, content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).map_err(|e| RepoError::io(object_dir, e))?;

        let temp_path = object_dir.join(format!("tmp-obj-{}", std::process::id()));

        let compressed = Self::compress(content)?;
        std::fs::write(&temp_path, &compressed).map_err(|e| RepoError::io(&temp_path, e))?;

        // rename so a partial write is never observable under the final name
        std::fs::rename(&temp_path, object_path).map_err(|e| RepoError::io(object_path, e))?;

        Ok(())
    }

    pub(crate) fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("unable to compress object content")?;

        encoder
            .finish()
            .map(Bytes::from)
            .context("unable to finish compressing object content")
    }

    pub(crate) fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut content = Vec::new();
        decoder
            .read_to_end(&mut content)
            .context("unable to decompress object content")?;

        Ok(Bytes::from(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::entry_mode::EntryMode;
    use crate::artifacts::objects::tree::TreeEntry;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn temp_database() -> (assert_fs::TempDir, Database) {
        let dir = assert_fs::TempDir::new().expect("failed to create temp dir");
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        (dir, database)
    }

    #[test]
    fn store_then_load_is_bit_exact() {
        let (_dir, database) = temp_database();

        let blob = Blob::new(Bytes::from_static(b"hello"));
        let oid = database.store(&blob).unwrap();
        assert_eq!(oid.as_ref(), "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");

        let (object_type, payload) = database.load(&oid).unwrap();
        assert_eq!(object_type, ObjectType::Blob);
        assert_eq!(payload, Bytes::from_static(b"hello"));
    }

    #[test]
    fn stored_file_inflates_to_canonical_form() {
        let (_dir, database) = temp_database();

        let blob = Blob::new(Bytes::from_static(b"hello"));
        let oid = database.store(&blob).unwrap();

        let object_path = database.objects_path().join(oid.to_path());
        assert!(object_path.exists());

        let compressed = std::fs::read(object_path).unwrap();
        let content = Database::decompress(compressed.into()).unwrap();
        assert_eq!(content, Bytes::from_static(b"blob 5\0hello"));
    }

    #[test]
    fn store_is_idempotent() {
        let (_dir, database) = temp_database();

        let blob = Blob::new(Bytes::from_static(b"twice"));
        let first = database.store(&blob).unwrap();
        let second = database.store(&blob).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_object_is_not_found() {
        let (_dir, database) = temp_database();

        let oid = ObjectId::try_parse("ab".repeat(20)).unwrap();
        let err = database.load(&oid).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepoError>(),
            Some(RepoError::NotFound(_))
        ));
    }

    #[test]
    fn garbage_object_file_is_corrupt() {
        let (_dir, database) = temp_database();

        let oid = ObjectId::try_parse("cd".repeat(20)).unwrap();
        let object_path = database.objects_path().join(oid.to_path());
        std::fs::create_dir_all(object_path.parent().unwrap()).unwrap();
        std::fs::write(&object_path, b"not zlib at all").unwrap();

        let err = database.load(&oid).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepoError>(),
            Some(RepoError::CorruptObject { .. })
        ));
    }

    #[test]
    fn size_mismatch_is_corrupt() {
        let (_dir, database) = temp_database();

        let oid = ObjectId::try_parse("ef".repeat(20)).unwrap();
        let object_path = database.objects_path().join(oid.to_path());
        std::fs::create_dir_all(object_path.parent().unwrap()).unwrap();
        let lying = Database::compress(Bytes::from_static(b"blob 99\0hello")).unwrap();
        std::fs::write(&object_path, &lying).unwrap();

        let err = database.load(&oid).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepoError>(),
            Some(RepoError::CorruptObject { .. })
        ));
    }

    #[test]
    fn typed_loader_rejects_wrong_kind() {
        let (_dir, database) = temp_database();

        let blob = Blob::new(Bytes::from_static(b"hello"));
        let oid = database.store(&blob).unwrap();

        let err = database.load_tree(&oid).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepoError>(),
            Some(RepoError::CorruptObject { .. })
        ));
    }

    #[test]
    fn tree_files_walks_nested_and_flat_trees() {
        let (_dir, database) = temp_database();

        let blob = Blob::new(Bytes::from_static(b"world"));
        let blob_oid = database.store(&blob).unwrap();

        let subtree = Tree::new(vec![TreeEntry::new(
            EntryMode::Regular,
            "b.txt".into(),
            blob_oid.clone(),
        )])
        .unwrap();
        let subtree_oid = database.store(&subtree).unwrap();

        let root = Tree::new(vec![
            TreeEntry::new(EntryMode::Regular, "a.txt".into(), blob_oid.clone()),
            TreeEntry::new(EntryMode::Directory, "dir".into(), subtree_oid),
        ])
        .unwrap();
        let root_oid = database.store(&root).unwrap();

        let mut files = BTreeMap::new();
        database.tree_files(&root_oid, "", &mut files).unwrap();

        assert_eq!(
            files.keys().collect::<Vec<_>>(),
            vec!["a.txt", "dir/b.txt"]
        );

        let flat = Tree::from_index_entries(vec![
            ("a.txt".to_string(), EntryMode::Regular, blob_oid.clone()),
            ("dir/b.txt".to_string(), EntryMode::Regular, blob_oid),
        ]);
        let flat_oid = database.store(&flat).unwrap();

        let mut flat_files = BTreeMap::new();
        database.tree_files(&flat_oid, "", &mut flat_files).unwrap();
        assert_eq!(files, flat_files);
    }

    proptest! {
        #[test]
        fn deflate_then_inflate_is_identity(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let original = Bytes::from(data);
            let round_tripped =
                Database::decompress(Database::compress(original.clone()).unwrap()).unwrap();
            prop_assert_eq!(round_tripped, original);
        }
    }

    #[test]
    fn codec_round_trips_a_one_mebibyte_payload() {
        let data = (0..1024 * 1024).map(|i| (i % 251) as u8).collect::<Vec<_>>();
        let original = Bytes::from(data);

        let round_tripped =
            Database::decompress(Database::compress(original.clone()).unwrap()).unwrap();
        assert_eq!(round_tripped, original);
    }
}
