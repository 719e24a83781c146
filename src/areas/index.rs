//! Staging index
//!
//! The index is a newline-delimited text file, one staged entry per line:
//!
//! ```text
//! <mode> <40-hex-sha> <path>
//! ```
//!
//! The path runs from after the second space to end-of-line, so it may
//! contain spaces (never a newline). Paths are forward-slash normalized
//! with no leading `./`. Staging appends, so a path can occur more than
//! once; readers resolve duplicates by letting the last entry win.

use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// A staged entry: the mode and blob hash recorded for a path
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub mode: EntryMode,
    pub oid: ObjectId,
}

/// The staging area file (`.mygit/index`)
#[derive(Debug)]
pub struct Index {
    path: Box<Path>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all staged entries, keyed by path; the last line for a path wins
    ///
    /// A missing index file reads as empty. Lines that do not parse are
    /// skipped.
    pub fn load(&self) -> anyhow::Result<BTreeMap<String, IndexEntry>> {
        let mut entries = BTreeMap::new();

        if !self.path.exists() {
            return Ok(entries);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| RepoError::io(self.path.as_ref(), e))?;

        for line in content.lines() {
            if line.is_empty() {
                continue;
            }

            let Some((mode, rest)) = line.split_once(' ') else {
                continue;
            };
            let Some((hash, path)) = rest.split_once(' ') else {
                continue;
            };
            let Ok(oid) = ObjectId::try_parse(hash) else {
                continue;
            };

            entries.insert(path.to_string(), IndexEntry::new(EntryMode::parse(mode), oid));
        }

        Ok(entries)
    }

    pub fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.load()?.is_empty())
    }

    /// Append an entry for a path
    ///
    /// Callers must ensure the path is visible (not hidden) and normalized.
    pub fn append(&self, path: &str, oid: &ObjectId, mode: EntryMode) -> anyhow::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RepoError::io(self.path.as_ref(), e))?;

        writeln!(file, "{} {} {}", mode.as_str(), oid, path)
            .map_err(|e| RepoError::io(self.path.as_ref(), e))?;

        Ok(())
    }

    /// Rewrite the index without the given path; returns whether any line
    /// was removed
    pub fn remove(&self, path: &str) -> anyhow::Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| RepoError::io(self.path.as_ref(), e))?;

        let mut removed = false;
        let kept = content
            .lines()
            .filter(|line| {
                let entry_path = line.splitn(3, ' ').nth(2);
                if entry_path == Some(path) {
                    removed = true;
                    false
                } else {
                    !line.is_empty()
                }
            })
            .collect::<Vec<_>>();

        if removed {
            let mut rewritten = kept.join("\n");
            if !rewritten.is_empty() {
                rewritten.push('\n');
            }
            std::fs::write(&self.path, rewritten)
                .map_err(|e| RepoError::io(self.path.as_ref(), e))?;
        }

        Ok(removed)
    }

    /// Truncate the index to zero bytes
    pub fn clear(&self) -> anyhow::Result<()> {
        std::fs::write(&self.path, b"").map_err(|e| RepoError::io(self.path.as_ref(), e))?;
        Ok(())
    }
}
