//! Blob object
//!
//! Blobs store raw file content, uninterpreted. Names and modes live in
//! trees, never here.

use crate::artifacts::objects::object::{FromPayload, Object, Payload};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

/// File content as stored in the object database
///
/// The payload is an opaque byte string, so arbitrary (non-UTF-8) file
/// contents round-trip bit-exact.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Payload for Blob {
    fn encode(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl FromPayload for Blob {
    fn decode(payload: Bytes) -> anyhow::Result<Self> {
        Ok(Self::new(payload))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).to_string()
    }
}
