use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn ls_tree(&mut self, sha: &str, name_only: bool) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(sha)?;
        let tree = self.database().load_tree(&oid)?;

        for entry in tree.entries() {
            if name_only {
                writeln!(self.writer(), "{}", entry.name())?;
            } else {
                writeln!(
                    self.writer(),
                    "{} {} {}\t{}",
                    entry.mode(),
                    entry.mode().object_type(),
                    entry.oid(),
                    entry.name()
                )?;
            }
        }

        Ok(())
    }
}
