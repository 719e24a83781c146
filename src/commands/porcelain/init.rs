use crate::areas::repository::Repository;
use crate::errors::RepoError;
use anyhow::Context;
use std::fs;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        let git_path = self.git_path();

        if git_path.exists() {
            anyhow::bail!(
                "a mygit repository already exists in {}",
                git_path.display()
            );
        }

        fs::create_dir_all(self.database().objects_path())
            .context("failed to create .mygit/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("failed to create .mygit/refs/heads directory")?;
        fs::create_dir_all(git_path.join("refs").join("tags"))
            .context("failed to create .mygit/refs/tags directory")?;
        fs::create_dir_all(git_path.join("logs"))
            .context("failed to create .mygit/logs directory")?;

        let head_path = self.refs().head_path();
        fs::write(&head_path, b"").map_err(|e| RepoError::io(&head_path, e))?;
        fs::write(self.index().path(), b"")
            .map_err(|e| RepoError::io(self.index().path(), e))?;

        writeln!(
            self.writer(),
            "Initialized empty mygit repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
