use crate::areas::repository::Repository;
use crate::artifacts::objects::object::FromPayload;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepoError;

impl Repository {
    pub fn cat_file(
        &mut self,
        sha: &str,
        pretty: bool,
        size: bool,
        kind: bool,
    ) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(sha)?;
        let (object_type, payload) = self.database().load(&oid)?;

        if kind {
            writeln!(self.writer(), "{}", object_type)?;
        }

        if size {
            writeln!(self.writer(), "{}", payload.len())?;
        }

        if pretty {
            match object_type {
                // raw bytes, so binary blobs survive a pipe
                ObjectType::Blob => self.writer().write_all(&payload)?,
                ObjectType::Tree => {
                    let tree = Tree::decode(payload)
                        .map_err(|e| RepoError::corrupt(&oid, e.to_string()))?;
                    writeln!(self.writer(), "{}", tree.display())?;
                }
                ObjectType::Commit => self.writer().write_all(&payload)?,
            }
        }

        Ok(())
    }
}
