use crate::error::Result;
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::repository::core::GitRepo;
use crate::git::validate;

impl GitRepo {
    /// Fetch from a remote, or from the default remote when none is given
    pub async fn fetch(&self, remote: Option<&str>) -> Result<String> {
        validate::optional_ref_name("remote", remote)?;

        let mut request = CommandRequest::new(GitVerb::Fetch);
        if let Some(remote) = remote {
            request = request.arg(remote);
        }
        self.run_mutating(request).await
    }

    /// Pull from a remote branch. Remote and branch are given together or not at all.
    pub async fn pull(&self, remote: Option<&str>, branch: Option<&str>) -> Result<String> {
        let target = validate::remote_branch_pair(remote, branch)?;

        let mut request = CommandRequest::new(GitVerb::Pull);
        if let Some((remote, branch)) = target {
            request = request.arg(remote).arg(branch);
        }
        self.run_mutating(request).await
    }

    /// Push to a remote branch. Remote and branch are given together or not at all.
    pub async fn push(&self, remote: Option<&str>, branch: Option<&str>, force: bool) -> Result<String> {
        let target = validate::remote_branch_pair(remote, branch)?;

        let mut request = CommandRequest::new(GitVerb::Push).arg_if(force, "--force");
        if let Some((remote, branch)) = target {
            request = request.arg(remote).arg(branch);
        }
        self.run_mutating(request).await
    }

    /// List remotes with their fetch and push URLs
    pub async fn get_remotes(&self) -> Result<String> {
        self.run_read(CommandRequest::new(GitVerb::Remote).arg("-v"))
            .await
    }
}
