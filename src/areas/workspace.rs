//! Working directory operations
//!
//! The workspace owns the single hidden-path rule used by every scanner:
//! a path is hidden when its basename starts with `.` or equals `.mygit`.
//! Hidden files are never indexed, never committed, and never written
//! during restoration.
//!
//! All paths handed out by the workspace are relative to the repository
//! root and forward-slash normalized.

use crate::errors::RepoError;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Repository directory name, excluded from every scan
pub const REPO_DIR: &str = ".mygit";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The hidden rule: basename starts with `.` or equals `.mygit`
    pub fn is_hidden(path: &Path) -> bool {
        match path.file_name() {
            Some(name) => {
                let name = name.to_string_lossy();
                name.starts_with('.') || name == REPO_DIR
            }
            None => false,
        }
    }

    /// Forward-slash normalize a repository-relative path
    pub fn normalize(path: &Path) -> String {
        path.components()
            .filter_map(|component| match component {
                std::path::Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// List every visible file under `start` (or the whole working tree),
    /// as sorted repository-relative paths
    pub fn list_files(&self, start: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root = match start {
            Some(start) => self.path.join(start),
            None => self.path.to_path_buf(),
        };

        if !root.exists() {
            return Err(RepoError::NotFound(format!("path '{}'", root.display())).into());
        }

        let mut files = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !Self::is_hidden(entry.path()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .map(Path::to_path_buf)
                    .ok()
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    /// List the visible immediate children of a directory, sorted by name
    pub fn list_entries(&self, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let full_dir = self.path.join(dir);

        let mut entries = std::fs::read_dir(&full_dir)
            .map_err(|e| RepoError::io(&full_dir, e))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| !Self::is_hidden(path))
            .filter_map(|path| {
                path.strip_prefix(self.path.as_ref())
                    .map(Path::to_path_buf)
                    .ok()
            })
            .collect::<Vec<_>>();

        entries.sort();
        Ok(entries)
    }

    pub fn is_file(&self, path: &Path) -> bool {
        self.path.join(path).is_file()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.path.join(path).is_dir()
    }

    /// Read a file's raw bytes
    pub fn read_file(&self, path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(path);
        let content = std::fs::read(&full_path).map_err(|e| RepoError::io(&full_path, e))?;

        Ok(Bytes::from(content))
    }

    /// Write a file in binary mode, creating parent directories as needed
    /// and overwriting any existing file
    pub fn write_file(&self, path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RepoError::io(parent, e))?;
        }

        std::fs::write(&full_path, content).map_err(|e| RepoError::io(&full_path, e))?;
        Ok(())
    }

    pub fn make_dir(&self, path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(path);
        std::fs::create_dir_all(&full_path).map_err(|e| RepoError::io(&full_path, e))?;
        Ok(())
    }

    /// Remove every entry in the working directory except `.mygit`
    ///
    /// Removal errors are demoted to warnings and the sweep continues.
    pub fn clear(&self) {
        let entries = match std::fs::read_dir(self.path.as_ref()) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("warning: unable to scan working directory: {}", e);
                return;
            }
        };

        for entry in entries.filter_map(|entry| entry.ok()) {
            if entry.file_name() == REPO_DIR {
                continue;
            }

            let path = entry.path();
            let result = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };

            if let Err(e) = result {
                eprintln!("warning: unable to remove {}: {}", path.display(), e);
            }
        }
    }
}
