use crate::error::Result;
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::repository::core::GitRepo;
use crate::git::validate;

impl GitRepo {
    /// List all branches, local and remote-tracking, with the current one marked `*`
    pub async fn branches(&self) -> Result<String> {
        self.run_read(CommandRequest::new(GitVerb::Branch).arg("-a"))
            .await
    }

    /// Get the current branch name, empty when HEAD is detached
    pub async fn current_branch(&self) -> Result<String> {
        let output = self
            .run_read(CommandRequest::new(GitVerb::Branch).arg("--show-current"))
            .await?;
        Ok(output.trim().to_string())
    }

    /// Create a new branch and switch to it
    pub async fn create_branch(&self, name: &str, start_point: Option<&str>) -> Result<String> {
        validate::ref_name("branch name", name)?;
        validate::optional_ref_name("start point", start_point)?;

        let mut request = CommandRequest::new(GitVerb::Checkout).arg("-b").arg(name);
        if let Some(start) = start_point {
            request = request.arg(start);
        }
        self.run_mutating(request).await
    }

    pub async fn delete_branch(&self, name: &str, force: bool) -> Result<String> {
        validate::ref_name("branch name", name)?;

        let request = CommandRequest::new(GitVerb::Branch)
            .arg(if force { "-D" } else { "-d" })
            .arg(name);
        self.run_mutating(request).await
    }

    /// Checkout a branch or commit
    pub async fn checkout(&self, reference: &str) -> Result<String> {
        validate::ref_name("ref", reference)?;
        self.run_mutating(CommandRequest::new(GitVerb::Checkout).arg(reference))
            .await
    }
}
