//! Status inspection
//!
//! Builds the three maps the classification works on:
//! - committed: files reachable from the HEAD commit's tree
//! - staged: the index
//! - working: the visible files on disk, hashed as canonical blobs
//!
//! and classifies every path appearing in any of them.

use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_state::FileState;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Classified working-tree state, keyed by path
#[derive(Debug, Default)]
pub struct StatusReport {
    pub entries: BTreeMap<String, FileState>,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn section(&self, pick: impl Fn(&FileState) -> bool) -> Vec<(&str, FileState)> {
        self.entries
            .iter()
            .filter(|(_, state)| pick(state))
            .map(|(path, state)| (path.as_str(), *state))
            .collect()
    }
}

/// Compares HEAD, index, and working directory
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl Inspector<'_> {
    pub fn report(&self) -> anyhow::Result<StatusReport> {
        let committed = self.repository.head_tree_files()?;
        let staged = self.repository.index().load()?;
        let working = self.working_files()?;

        let mut paths = BTreeSet::new();
        paths.extend(committed.keys().cloned());
        paths.extend(staged.keys().cloned());
        paths.extend(working.keys().cloned());

        let mut entries = BTreeMap::new();
        for path in paths {
            let state = FileState::classify(
                committed.get(&path),
                staged.get(&path).map(|entry| &entry.oid),
                working.get(&path),
            );

            if let Some(state) = state {
                entries.insert(path, state);
            }
        }

        Ok(StatusReport { entries })
    }

    /// Visible files on disk, hashed as the blobs they would become
    fn working_files(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let workspace = self.repository.workspace();
        let mut files = BTreeMap::new();

        for path in workspace.list_files(None)? {
            let content = workspace.read_file(&path)?;
            let oid = Blob::new(content).object_id()?;
            files.insert(Workspace::normalize(&path), oid);
        }

        Ok(files)
    }
}
