//! Core object traits
//!
//! Every object kind implements two seams:
//! - `Payload`: canonical serialization of the payload bytes
//! - `FromPayload`: parsing back from payload bytes
//!
//! The object store owns the outer `<kind> <size>\0` framing; encoders and
//! decoders here operate on payloads only. The object id is the SHA-1 of
//! the framed form, so two objects with the same payload but different
//! kinds hash differently.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::Write;

/// Canonical payload serialization
pub trait Payload {
    /// Serialize the object payload (without the `<kind> <size>\0` header)
    fn encode(&self) -> Result<Bytes>;
}

/// Parsing from payload bytes (header already stripped by the store)
pub trait FromPayload {
    fn decode(payload: Bytes) -> Result<Self>
    where
        Self: Sized;
}

/// Common object operations: kind, framing, id computation, display
pub trait Object: Payload {
    fn object_type(&self) -> ObjectType;

    /// Human-readable rendering for `cat-file -p`
    fn display(&self) -> String;

    /// The full canonical form `<kind> <size>\0<payload>` that is hashed
    /// and stored
    fn framed(&self) -> Result<Bytes> {
        let payload = self.encode()?;

        let mut framed = Vec::with_capacity(payload.len() + 16);
        write!(framed, "{} {}\0", self.object_type().as_str(), payload.len())?;
        framed.write_all(&payload)?;

        Ok(Bytes::from(framed))
    }

    /// Compute the object id (SHA-1 over the framed form)
    fn object_id(&self) -> Result<ObjectId> {
        let mut hasher = Sha1::new();
        hasher.update(&self.framed()?);

        let digest = hasher.finalize();
        ObjectId::try_parse(format!("{digest:x}"))
    }
}
