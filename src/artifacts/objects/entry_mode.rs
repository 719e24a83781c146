//! Tree entry modes
//!
//! Only two modes exist in this engine: `100644` for regular files and
//! `40000` for directories. Decoders accept the padded `040000` spelling
//! as well; encoders always write `40000`.

use crate::artifacts::objects::object_type::ObjectType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    Regular,
    Directory,
}

impl EntryMode {
    /// Mode string as written into tree payloads and the index
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::Regular => "100644",
            EntryMode::Directory => "40000",
        }
    }

    /// The object kind an entry of this mode points at
    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::Regular => ObjectType::Blob,
            EntryMode::Directory => ObjectType::Tree,
        }
    }

    /// Parse a mode string; anything that is not a tree mode is a blob
    pub fn parse(mode: &str) -> Self {
        match mode {
            "40000" | "040000" => EntryMode::Directory,
            _ => EntryMode::Regular,
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_tree_spellings_parse_as_directory() {
        assert_eq!(EntryMode::parse("40000"), EntryMode::Directory);
        assert_eq!(EntryMode::parse("040000"), EntryMode::Directory);
    }

    #[test]
    fn unrecognized_modes_fall_back_to_regular() {
        assert_eq!(EntryMode::parse("100644"), EntryMode::Regular);
        assert_eq!(EntryMode::parse("100755"), EntryMode::Regular);
    }

    #[test]
    fn directory_mode_is_written_unpadded() {
        assert_eq!(EntryMode::Directory.as_str(), "40000");
    }
}
