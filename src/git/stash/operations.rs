use crate::error::Result;
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::repository::core::GitRepo;
use crate::git::validate;

/// The most recent stash entry
pub const LATEST_STASH: &str = "stash@{0}";

fn stash_ref_request(action: &str, stash_ref: &str) -> Result<CommandRequest> {
    validate::ref_name("stash ref", stash_ref)?;
    Ok(CommandRequest::new(GitVerb::Stash).arg(action).arg(stash_ref))
}

impl GitRepo {
    /// Stash working-tree changes, optionally including untracked files
    pub async fn stash_push(&self, message: Option<&str>, include_untracked: bool) -> Result<String> {
        let mut request = CommandRequest::new(GitVerb::Stash).arg("push");
        if let Some(message) = message {
            validate::message("stash message", message)?;
            request = request.arg("-m").arg(message);
        }
        self.run_mutating(request.arg_if(include_untracked, "-u"))
            .await
    }

    pub async fn stash_list(&self) -> Result<String> {
        self.run_read(CommandRequest::new(GitVerb::Stash).arg("list"))
            .await
    }

    /// Apply a stash and drop it
    pub async fn stash_pop(&self, stash_ref: &str) -> Result<String> {
        self.run_mutating(stash_ref_request("pop", stash_ref)?).await
    }

    /// Apply a stash without removing it
    pub async fn stash_apply(&self, stash_ref: &str) -> Result<String> {
        self.run_mutating(stash_ref_request("apply", stash_ref)?)
            .await
    }

    pub async fn stash_drop(&self, stash_ref: &str) -> Result<String> {
        self.run_mutating(stash_ref_request("drop", stash_ref)?).await
    }

    /// Show a stash as a patch
    pub async fn stash_show(&self, stash_ref: &str) -> Result<String> {
        validate::ref_name("stash ref", stash_ref)?;
        self.run_read(
            CommandRequest::new(GitVerb::Stash)
                .arg("show")
                .arg("-p")
                .arg(stash_ref),
        )
        .await
    }
}
