use crate::error::{GitError, Result};
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::repository::core::GitRepo;
use crate::git::validate;

pub(crate) fn merge_head_probe() -> CommandRequest {
    CommandRequest::new(GitVerb::RevParse)
        .arg("-q")
        .arg("--verify")
        .arg("MERGE_HEAD")
}

pub(crate) fn abort_request() -> CommandRequest {
    CommandRequest::new(GitVerb::Merge).arg("--abort")
}

/// `rev-parse -q --verify` exits 1 with no output when the ref is absent
pub(crate) fn interpret_merge_head(result: Result<String>) -> Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(GitError::ExternalTool {
            status: Some(1), ..
        }) => Ok(false),
        Err(e) => Err(e),
    }
}

impl GitRepo {
    /// Merge a branch into the current branch
    pub async fn merge(&self, branch: &str, strategy: Option<&str>) -> Result<String> {
        validate::ref_name("branch", branch)?;
        validate::optional_ref_name("merge strategy", strategy)?;

        let mut request = CommandRequest::new(GitVerb::Merge);
        if let Some(strategy) = strategy {
            request = request.arg("-s").arg(strategy);
        }
        self.run_mutating(request.arg(branch)).await
    }

    /// Discard an in-progress merge and restore the pre-merge state
    pub async fn abort_merge(&self) -> Result<String> {
        self.run_mutating(abort_request()).await
    }

    /// Return true if a merge is in progress (MERGE_HEAD exists)
    pub async fn is_merge_in_progress(&self) -> Result<bool> {
        interpret_merge_head(self.run_read(merge_head_probe()).await)
    }

    /// Check out `target`, then merge `source` into it
    pub async fn merge_branch(&self, source: &str, target: &str) -> Result<String> {
        validate::ref_name("source branch", source)?;
        validate::ref_name("target branch", target)?;

        let session = self.exclusive().await;
        session
            .run(&CommandRequest::new(GitVerb::Checkout).arg(target))
            .await?;
        session
            .run(&CommandRequest::new(GitVerb::Merge).arg(source))
            .await
    }

    /// Check out `source`, then rebase it onto `target`
    pub async fn rebase_branch(&self, source: &str, target: &str) -> Result<String> {
        validate::ref_name("source branch", source)?;
        validate::ref_name("target branch", target)?;

        let session = self.exclusive().await;
        session
            .run(&CommandRequest::new(GitVerb::Checkout).arg(source))
            .await?;
        session
            .run(&CommandRequest::new(GitVerb::Rebase).arg(target))
            .await
    }

    /// Rebase current branch onto another
    pub async fn rebase(&self, branch: &str, interactive: bool) -> Result<String> {
        validate::ref_name("branch", branch)?;
        self.run_mutating(
            CommandRequest::new(GitVerb::Rebase)
                .arg_if(interactive, "-i")
                .arg(branch),
        )
        .await
    }
}
