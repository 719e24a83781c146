//! Repository abstraction and coordination
//!
//! `Repository` is the single handle threaded through every operation. It
//! is a facade over the lower-level areas (database, index, workspace,
//! refs); the command implementations in `crate::commands` are
//! `impl Repository` blocks that compose them.
//!
//! The repository must live in the current working directory; no parent
//! directories are searched.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::{REPO_DIR, Workspace};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use std::cell::{RefCell, RefMut};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Object database directory name
const DATABASE_DIR: &str = "objects";

/// Index file name
const INDEX_FILE: &str = "index";

/// Repository handle
///
/// Coordinates all operations and provides access to the database, index,
/// workspace, and refs subsystems.
pub struct Repository {
    /// Repository root path (the working directory)
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Staging area
    index: Index,
    /// Object database
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// HEAD, master, and the history log
    refs: Refs,
}

impl Repository {
    /// Create a handle without requiring the repository to exist yet;
    /// used by `init`
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> Self {
        let index = Index::new(path.join(REPO_DIR).join(INDEX_FILE).into_boxed_path());
        let database = Database::new(path.join(REPO_DIR).join(DATABASE_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(REPO_DIR).into_boxed_path());

        Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index,
            database,
            workspace,
            refs,
        }
    }

    /// Open an existing repository in `path`; fails when `.mygit` is absent
    pub fn open(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.join(REPO_DIR).is_dir() {
            return Err(RepoError::NotARepo.into());
        }

        Ok(Self::new(path, writer))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(REPO_DIR)
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// All files reachable from the HEAD commit's tree, keyed by path
    ///
    /// Empty when no commit exists yet.
    pub fn head_tree_files(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let mut files = BTreeMap::new();

        if let Some(head) = self.refs.read_head()? {
            let commit = self.database.load_commit(&head)?;
            self.database
                .tree_files(commit.tree_oid(), "", &mut files)?;
        }

        Ok(files)
    }
}
