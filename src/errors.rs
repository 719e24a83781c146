//! Error taxonomy for repository operations
//!
//! Leaf components construct these values and bubble them up unchanged
//! through `anyhow` to the command handler, which prints a one-line
//! diagnostic and exits non-zero. Callers that care about the failure kind
//! (and tests) use `downcast_ref::<RepoError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    /// Malformed invocation that clap could not catch on its own
    #[error("usage: {0}")]
    Usage(String),

    /// The current directory does not contain a `.mygit` repository
    #[error("not a mygit repository (run 'mygit init' first)")]
    NotARepo,

    /// Read/write/open failure, tagged with the offending path
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Object, commit, or index entry missing
    #[error("{0} not found")]
    NotFound(String),

    /// Decompression failed, header malformed, size mismatch, or an object
    /// of the wrong kind where a specific kind was expected
    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: String, reason: String },

    /// The index is empty at commit time
    #[error("nothing to commit (use 'mygit add' first)")]
    NothingToCommit,

    /// Not 40 hexadecimal characters
    #[error("invalid object id '{0}': expected 40 hexadecimal characters")]
    InvalidObjectId(String),
}

impl RepoError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepoError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(oid: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        RepoError::CorruptObject {
            oid: oid.to_string(),
            reason: reason.into(),
        }
    }
}
