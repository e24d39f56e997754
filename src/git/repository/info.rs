use crate::error::Result;
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::repository::core::GitRepo;
use crate::git::validate;

impl GitRepo {
    /// Get all tags
    pub async fn get_tags(&self) -> Result<String> {
        self.run_read(CommandRequest::new(GitVerb::Tag).arg("-l"))
            .await
    }

    /// Get one config value, or the whole effective config when `key` is `None`.
    ///
    /// An unset key fails with exit code 1 and empty diagnostics.
    pub async fn get_config(&self, key: Option<&str>) -> Result<String> {
        let request = match key {
            Some(key) => {
                validate::ref_name("config key", key)?;
                CommandRequest::new(GitVerb::Config).arg("--get").arg(key)
            }
            None => CommandRequest::new(GitVerb::Config).arg("--list"),
        };
        self.run_read(request).await
    }
}
