use crate::areas::repository::Repository;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::RepoError;
use std::path::Path;

impl Repository {
    /// Reset dispatch:
    /// - no arguments: clear the index
    /// - `--hard [sha]`: restore the given commit (HEAD when omitted) and
    ///   clear the index
    /// - a lone existing commit sha: move HEAD to it and clear the index
    /// - anything else: treat the arguments as paths and reset each to its
    ///   HEAD version in the index
    pub fn reset(&mut self, hard: bool, args: &[String]) -> anyhow::Result<()> {
        let mut commit_sha = None;
        let mut paths = Vec::new();

        for arg in args {
            let looks_like_commit = arg.len() == OBJECT_ID_LENGTH
                && ObjectId::try_parse(arg.as_str())
                    .map(|oid| self.database().exists(&oid))
                    .unwrap_or(false);

            if looks_like_commit {
                commit_sha = Some(ObjectId::try_parse(arg.as_str())?);
            } else {
                paths.push(arg.clone());
            }
        }

        if hard {
            if !paths.is_empty() {
                return Err(RepoError::Usage(
                    "mygit reset --hard [<commit-sha>]".to_string(),
                )
                .into());
            }

            let oid = match commit_sha {
                Some(oid) => oid,
                None => self
                    .refs()
                    .read_head()?
                    .ok_or_else(|| RepoError::NotFound("HEAD commit".to_string()))?,
            };
            return self.reset_to_commit(&oid);
        }

        match (commit_sha, paths.is_empty()) {
            (None, true) => self.index().clear(),
            (Some(oid), true) => {
                self.refs().write_head(&oid)?;
                self.index().clear()?;
                writeln!(self.writer(), "Reset HEAD to {}", oid.to_short_oid())?;
                Ok(())
            }
            (Some(_), false) => Err(RepoError::Usage(
                "cannot mix a commit sha and paths without --hard".to_string(),
            )
            .into()),
            (None, false) => self.reset_paths(&paths),
        }
    }

    /// Hard reset: checkout-like restoration plus an index clear
    fn reset_to_commit(&mut self, oid: &ObjectId) -> anyhow::Result<()> {
        let commit = self.database().load_commit(oid)?;

        self.workspace().clear();
        self.restore_tree(commit.tree_oid(), Path::new(""))?;
        self.index().clear()?;
        self.refs().write_head(oid)?;

        writeln!(self.writer(), "HEAD is now at {}", oid.to_short_oid())?;

        Ok(())
    }

    /// Path-level reset: drop each path from the index, then re-stage it
    /// at its HEAD blob hash
    fn reset_paths(&mut self, paths: &[String]) -> anyhow::Result<()> {
        if self.refs().read_head()?.is_none() {
            return Err(RepoError::NotFound("HEAD commit".to_string()).into());
        }

        let committed = self.head_tree_files()?;

        for path in paths {
            let removed = self.index().remove(path)?;

            match committed.get(path) {
                Some(head_oid) => {
                    self.index().append(path, head_oid, EntryMode::Regular)?;
                    writeln!(self.writer(), "Reset '{}' to HEAD", path)?;
                }
                None => {
                    eprintln!("warning: '{}' not found in HEAD commit", path);
                    if removed {
                        writeln!(self.writer(), "Unstaged '{}'", path)?;
                    }
                }
            }
        }

        Ok(())
    }
}
