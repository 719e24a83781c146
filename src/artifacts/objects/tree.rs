//! Tree object
//!
//! Trees enumerate named entries (blobs or sub-trees) with modes. Entries
//! are kept strictly sorted by name; the payload concatenates
//! `<mode> <name>\0<20-byte-raw-sha>` per entry.
//!
//! ## Two builders
//!
//! - `Tree::new` is the nested form produced by the directory walk: names
//!   are single path components, so `/` is rejected.
//! - `Tree::from_index_entries` is the flat form produced at commit time:
//!   one tree whose entry names are full slash-qualified paths, sorted by
//!   the path as a single string. Restoration re-creates parent
//!   directories from those names.

use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{FromPayload, Object, Payload};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Cursor, Write};

/// A single named entry inside a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    mode: EntryMode,
    name: String,
    oid: ObjectId,
}

impl TreeEntry {
    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }
}

/// Directory snapshot object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a nested-form tree from component-named entries
    ///
    /// Validates strict ascending order by name, and rejects empty names
    /// and names containing `\0` or `/`.
    pub fn new(entries: Vec<TreeEntry>) -> anyhow::Result<Self> {
        for entry in &entries {
            if entry.name.is_empty() {
                anyhow::bail!("tree entry with empty name");
            }
            if entry.name.contains('\0') || entry.name.contains('/') {
                anyhow::bail!("invalid character in tree entry name '{}'", entry.name);
            }
        }

        for pair in entries.windows(2) {
            if pair[0].name >= pair[1].name {
                anyhow::bail!(
                    "tree entries out of order: '{}' before '{}'",
                    pair[0].name,
                    pair[1].name
                );
            }
        }

        Ok(Tree { entries })
    }

    pub fn empty() -> Self {
        Tree::default()
    }

    /// Build the flat tree used by `commit`: one entry per staged path,
    /// the full path as the entry name, sorted by the path string
    pub fn from_index_entries(
        entries: impl IntoIterator<Item = (String, EntryMode, ObjectId)>,
    ) -> Self {
        let mut entries = entries
            .into_iter()
            .map(|(path, mode, oid)| TreeEntry::new(mode, path, oid))
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Tree { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }
}

impl Payload for Tree {
    fn encode(&self) -> anyhow::Result<Bytes> {
        let mut payload = Vec::new();

        for entry in &self.entries {
            write!(payload, "{} {}\0", entry.mode.as_str(), entry.name)?;
            entry.oid.write_raw_to(&mut payload)?;
        }

        Ok(Bytes::from(payload))
    }
}

impl FromPayload for Tree {
    fn decode(payload: Bytes) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        let mut reader = Cursor::new(payload);

        // Reuse scratch buffers across entries
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.last() != Some(&b' ') {
                anyhow::bail!("unexpected EOF in tree entry mode");
            }
            mode_bytes.pop();

            let mode_str = std::str::from_utf8(&mode_bytes)?;
            let mode = EntryMode::parse(mode_str);

            name_bytes.clear();
            let n = reader.read_until(b'\0', &mut name_bytes)?;
            if n == 0 || name_bytes.last() != Some(&b'\0') {
                anyhow::bail!("unexpected EOF in tree entry name");
            }
            name_bytes.pop();
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid = ObjectId::read_raw_from(&mut reader)
                .context("unexpected EOF in tree entry object id")?;

            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.mode.object_type().as_str(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
