//! Tri-state file classification
//!
//! Each path is looked up in three maps — committed (HEAD tree), staged
//! (index), and working (directory scan) — and classified by presence and
//! hash equality. A path present in all three with all hashes equal is
//! clean and gets no state at all.

use crate::artifacts::objects::object_id::ObjectId;

/// The state of one path across (HEAD, index, working)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// Staged new file, unchanged on disk
    Added,
    /// Staged new file, modified again on disk
    AddedModified,
    /// Staged new file, deleted from disk
    AddedDeleted,
    /// On disk only
    Untracked,
    /// Committed, deleted from disk, deletion not staged
    DeletedUnstaged,
    /// Committed, deletion staged
    Deleted,
    /// Staged modification, unchanged since staging
    Modified,
    /// Staged modification, modified again on disk
    ModifiedModified,
    /// Committed, modified on disk, modification not staged
    ModifiedUnstaged,
}

impl FileState {
    /// Derive the state from presence and hash equality in the three maps
    ///
    /// Returns `None` for paths that are clean (or absent everywhere).
    pub fn classify(
        committed: Option<&ObjectId>,
        staged: Option<&ObjectId>,
        working: Option<&ObjectId>,
    ) -> Option<FileState> {
        match (committed, staged, working) {
            (None, Some(staged), Some(working)) => Some(if staged == working {
                FileState::Added
            } else {
                FileState::AddedModified
            }),
            (None, Some(_), None) => Some(FileState::AddedDeleted),
            (None, None, Some(_)) => Some(FileState::Untracked),
            (Some(_), None, None) => Some(FileState::DeletedUnstaged),
            (Some(_), Some(_), None) => Some(FileState::Deleted),
            (Some(committed), Some(staged), Some(working)) => {
                if staged != committed {
                    Some(if staged == working {
                        FileState::Modified
                    } else {
                        FileState::ModifiedModified
                    })
                } else if staged != working {
                    Some(FileState::ModifiedUnstaged)
                } else {
                    None
                }
            }
            (Some(committed), None, Some(working)) => {
                (committed != working).then_some(FileState::ModifiedUnstaged)
            }
            (None, None, None) => None,
        }
    }

    /// Shown under "Changes to be committed"
    pub fn is_staged(&self) -> bool {
        matches!(
            self,
            FileState::Added | FileState::Modified | FileState::Deleted
        )
    }

    /// Shown under "Changes not staged for commit"
    pub fn is_unstaged(&self) -> bool {
        matches!(
            self,
            FileState::ModifiedUnstaged
                | FileState::AddedModified
                | FileState::ModifiedModified
                | FileState::DeletedUnstaged
        )
    }

    /// Shown under "Untracked files"
    pub fn is_untracked(&self) -> bool {
        matches!(self, FileState::Untracked)
    }

    /// Label inside the staged/unstaged sections
    pub fn label(&self) -> &'static str {
        match self {
            FileState::Added => "new file:",
            FileState::Deleted | FileState::DeletedUnstaged => "deleted:",
            _ => "modified:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn oid(fill: &str) -> ObjectId {
        ObjectId::try_parse(fill.repeat(20)).unwrap()
    }

    // One case per row of the classification table. `c`/`i`/`w` name the
    // hash in each map; equal letters mean equal hashes.
    #[rstest]
    #[case(None, Some("aa"), Some("aa"), Some(FileState::Added))]
    #[case(None, Some("aa"), Some("bb"), Some(FileState::AddedModified))]
    #[case(None, Some("aa"), None, Some(FileState::AddedDeleted))]
    #[case(None, None, Some("aa"), Some(FileState::Untracked))]
    #[case(Some("aa"), None, None, Some(FileState::DeletedUnstaged))]
    #[case(Some("aa"), Some("aa"), None, Some(FileState::Deleted))]
    #[case(Some("aa"), Some("bb"), Some("bb"), Some(FileState::Modified))]
    #[case(Some("aa"), Some("bb"), Some("cc"), Some(FileState::ModifiedModified))]
    #[case(Some("aa"), Some("aa"), Some("bb"), Some(FileState::ModifiedUnstaged))]
    #[case(Some("aa"), None, Some("bb"), Some(FileState::ModifiedUnstaged))]
    #[case(Some("aa"), None, Some("aa"), None)]
    #[case(Some("aa"), Some("aa"), Some("aa"), None)]
    #[case(None, None, None, None)]
    fn classification_table(
        #[case] committed: Option<&str>,
        #[case] staged: Option<&str>,
        #[case] working: Option<&str>,
        #[case] expected: Option<FileState>,
    ) {
        let committed = committed.map(oid);
        let staged = staged.map(oid);
        let working = working.map(oid);

        assert_eq!(
            FileState::classify(committed.as_ref(), staged.as_ref(), working.as_ref()),
            expected
        );
    }

    #[test]
    fn every_state_lands_in_at_most_one_section() {
        let states = [
            FileState::Added,
            FileState::AddedModified,
            FileState::AddedDeleted,
            FileState::Untracked,
            FileState::DeletedUnstaged,
            FileState::Deleted,
            FileState::Modified,
            FileState::ModifiedModified,
            FileState::ModifiedUnstaged,
        ];

        for state in states {
            let sections = [state.is_staged(), state.is_unstaged(), state.is_untracked()]
                .iter()
                .filter(|&&s| s)
                .count();
            assert!(sections <= 1, "{state:?} appears in {sections} sections");
        }
    }
}
