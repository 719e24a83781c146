//! Command implementations
//!
//! Organized into two categories:
//!
//! - `plumbing`: low-level object manipulation (hash-object, cat-file,
//!   ls-tree, write-tree)
//! - `porcelain`: user-facing workflows (init, add, commit, status, log,
//!   show, checkout, reset)
//!
//! Each command is an `impl Repository` block composing the areas and
//! artifacts.

pub mod plumbing;
pub mod porcelain;
