//! References and history log
//!
//! This engine keeps a single linear history:
//! - `HEAD` is one line holding the 40-hex id of the current commit, or
//!   empty while no commit exists
//! - `refs/heads/master` mirrors `HEAD` after each commit
//! - `logs/HEAD` is an append-only record of commits:
//!   `<old-sha|40-zeros> <new-sha> <identity> <epoch> <tz> commit: <message>`
//!
//! The log is appended before `HEAD` is rewritten, so a crash between the
//! two leaves them divergent in at most one direction.

use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::RepoError;
use std::io::Write;
use std::path::{Path, PathBuf};

const HEAD_FILE: &str = "HEAD";
const MASTER_REF: &str = "master";
const LOG_MARKER: &str = " commit: ";

/// One line of `logs/HEAD`, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// The previous `HEAD`; `None` for the root commit (recorded as 40 zeros)
    pub parent: Option<ObjectId>,
    pub commit: ObjectId,
    pub committer: String,
    /// `<epoch-seconds> <tz>` as written
    pub date: String,
    pub message: String,
}

/// Reference manager rooted at `.mygit`
#[derive(Debug)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_FILE)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }

    pub fn log_path(&self) -> PathBuf {
        self.path.join("logs").join(HEAD_FILE)
    }

    /// Read the current commit; empty or missing `HEAD` means no commit yet
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        let head_path = self.head_path();
        if !head_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&head_path)
            .map_err(|e| RepoError::io(&head_path, e))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content)?))
    }

    /// Replace the single `HEAD` line via a temp file and rename
    pub fn write_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        Self::write_ref_file(&self.head_path(), oid)
    }

    /// Mirror the current commit into `refs/heads/master`
    pub fn update_master(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let heads = self.heads_path();
        std::fs::create_dir_all(&heads).map_err(|e| RepoError::io(&heads, e))?;

        Self::write_ref_file(&heads.join(MASTER_REF), oid)
    }

    fn write_ref_file(path: &Path, oid: &ObjectId) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("invalid ref path {}", path.display()))?;
        let temp_path = parent.join(format!("tmp-ref-{}", std::process::id()));

        std::fs::write(&temp_path, oid.as_ref()).map_err(|e| RepoError::io(&temp_path, e))?;
        std::fs::rename(&temp_path, path).map_err(|e| RepoError::io(path, e))?;

        Ok(())
    }

    /// Append one commit record to `logs/HEAD`
    ///
    /// The message is flattened to a single line so the log stays
    /// line-oriented.
    pub fn append_log(
        &self,
        old: Option<&ObjectId>,
        new: &ObjectId,
        committer: &Author,
        message: &str,
    ) -> anyhow::Result<()> {
        let log_path = self.log_path();
        let log_dir = log_path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("invalid log path {}", log_path.display()))?;
        std::fs::create_dir_all(log_dir).map_err(|e| RepoError::io(log_dir, e))?;

        let old_field = match old {
            Some(oid) => oid.as_ref().to_string(),
            None => "0".repeat(OBJECT_ID_LENGTH),
        };
        let message = message.replace('\n', " ");

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| RepoError::io(&log_path, e))?;
        writeln!(
            file,
            "{} {} {} {}{}{}",
            old_field,
            new,
            committer.identity(),
            committer.timestamp_str(),
            LOG_MARKER,
            message
        )
        .map_err(|e| RepoError::io(&log_path, e))?;

        Ok(())
    }

    /// Read all log records, oldest first; missing log reads as empty
    pub fn read_log(&self) -> anyhow::Result<Vec<LogRecord>> {
        let log_path = self.log_path();
        if !log_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&log_path)
            .map_err(|e| RepoError::io(&log_path, e))?;

        content
            .lines()
            .filter(|line| !line.is_empty())
            .map(Self::parse_log_line)
            .collect()
    }

    fn parse_log_line(line: &str) -> anyhow::Result<LogRecord> {
        let (fields, message) = line
            .split_once(LOG_MARKER)
            .ok_or_else(|| anyhow::anyhow!("malformed log line '{}'", line))?;

        let words = fields.split(' ').collect::<Vec<_>>();
        if words.len() < 4 {
            anyhow::bail!("malformed log line '{}'", line);
        }

        let parent = if words[0] == "0".repeat(OBJECT_ID_LENGTH) {
            None
        } else {
            Some(ObjectId::try_parse(words[0])?)
        };
        let commit = ObjectId::try_parse(words[1])?;
        let committer = words[2..words.len() - 2].join(" ");
        let date = format!("{} {}", words[words.len() - 2], words[words.len() - 1]);

        Ok(LogRecord {
            parent,
            commit,
            committer,
            date,
            message: message.to_string(),
        })
    }
}
