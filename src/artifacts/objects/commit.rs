//! Commit object
//!
//! A commit names a tree, an optional parent (absent for the root commit),
//! author and committer identities with timestamps, and a message.
//!
//! ## Format
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <epoch-seconds> <tz>
//! committer <name> <email> <epoch-seconds> <tz>
//!
//! <message>
//! ```
//!
//! Headers are written in that fixed order. Decoding ignores unrecognized
//! header lines so newer writers stay readable.

use crate::artifacts::objects::object::{FromPayload, Object, Payload};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;

/// Author or committer identity with timestamp
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// The commit author, from `GIT_AUTHOR_NAME`/`GIT_AUTHOR_EMAIL` when
    /// set, stamped with the current UTC time
    pub fn author() -> Self {
        Self::from_env("GIT_AUTHOR_NAME", "GIT_AUTHOR_EMAIL", "Author", "author@example.com")
    }

    /// The committer, from `GIT_COMMITTER_NAME`/`GIT_COMMITTER_EMAIL` when
    /// set, stamped with the current UTC time
    pub fn committer() -> Self {
        Self::from_env(
            "GIT_COMMITTER_NAME",
            "GIT_COMMITTER_EMAIL",
            "Committer",
            "committer@example.com",
        )
    }

    fn from_env(name_var: &str, email_var: &str, default_name: &str, default_email: &str) -> Self {
        let name = std::env::var(name_var).unwrap_or_else(|_| default_name.to_string());
        let email = std::env::var(email_var).unwrap_or_else(|_| default_email.to_string());

        Author {
            name,
            email,
            timestamp: chrono::Utc::now().fixed_offset(),
        }
    }

    /// `Name <email>`
    pub fn identity(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// `<epoch-seconds> <tz>`, e.g. `1712345678 +0000`
    pub fn timestamp_str(&self) -> String {
        format!(
            "{} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Full header value: `Name <email> <epoch-seconds> <tz>`
    pub fn display(&self) -> String {
        format!("{} {}", self.identity(), self.timestamp_str())
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        // Format: "name <email> epoch tz"; split from the right so names
        // containing spaces survive
        let parts = value.rsplitn(3, ' ').collect::<Vec<_>>();
        if parts.len() < 3 {
            anyhow::bail!("invalid author format '{}'", value);
        }

        let timezone = parts[0];
        let epoch = parts[1];
        let name_email = parts[2];

        let email_start = name_email
            .find('<')
            .with_context(|| format!("missing '<' in author '{}'", value))?;
        let email_end = name_email
            .find('>')
            .with_context(|| format!("missing '>' in author '{}'", value))?;

        let name = name_email[..email_start].trim().to_string();
        let email = name_email[email_start + 1..email_end].to_string();

        let timestamp =
            chrono::DateTime::parse_from_str(&format!("{} {}", epoch, timezone), "%s %z")
                .with_context(|| format!("invalid author timestamp in '{}'", value))?;

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Snapshot of the repository with history metadata
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    tree_oid: ObjectId,
    parent: Option<ObjectId>,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        committer: Author,
        message: String,
    ) -> Self {
        Commit {
            tree_oid,
            parent,
            author,
            committer,
            message,
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    /// None marks a root commit
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Payload for Commit {
    fn encode(&self) -> anyhow::Result<Bytes> {
        let mut lines = Vec::new();

        lines.push(format!("tree {}", self.tree_oid));
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());

        let mut payload = lines.join("\n");
        payload.push('\n');
        payload.push_str(&self.message);
        payload.push('\n');

        Ok(Bytes::from(payload))
    }
}

impl FromPayload for Commit {
    fn decode(payload: Bytes) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(&payload).context("commit payload is not UTF-8")?;

        let (headers, message) = content
            .split_once("\n\n")
            .context("commit object missing blank line before message")?;

        let mut tree_oid = None;
        let mut parent = None;
        let mut author = None;
        let mut committer = None;

        for line in headers.lines() {
            if let Some(value) = line.strip_prefix("tree ") {
                tree_oid = Some(ObjectId::try_parse(value)?);
            } else if let Some(value) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(value)?);
            } else if let Some(value) = line.strip_prefix("author ") {
                author = Some(Author::try_from(value)?);
            } else if let Some(value) = line.strip_prefix("committer ") {
                committer = Some(Author::try_from(value)?);
            }
            // unknown header lines are ignored
        }

        let tree_oid = tree_oid.context("commit object missing tree header")?;
        let author = author.context("commit object missing author header")?;
        let committer = committer.context("commit object missing committer header")?;

        let message = message.strip_suffix('\n').unwrap_or(message).to_string();

        Ok(Commit {
            tree_oid,
            parent,
            author,
            committer,
            message,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let encoded = self.encode().unwrap_or_default();
        String::from_utf8_lossy(&encoded).to_string()
    }
}
