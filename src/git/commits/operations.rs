use crate::error::Result;
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::repository::core::GitRepo;
use crate::git::validate;

/// How far `reset` rewinds: branch only, branch and index, or everything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetMode {
    #[default]
    Soft,
    Mixed,
    Hard,
}

impl ResetMode {
    fn flag(self) -> &'static str {
        match self {
            ResetMode::Soft => "--soft",
            ResetMode::Mixed => "--mixed",
            ResetMode::Hard => "--hard",
        }
    }
}

impl GitRepo {
    /// Get the one-line commit graph, newest first
    pub async fn log(&self, max_count: u32, branch: Option<&str>) -> Result<String> {
        validate::optional_ref_name("branch", branch)?;

        let mut request = CommandRequest::new(GitVerb::Log)
            .arg(format!("--max-count={max_count}"))
            .arg("--oneline")
            .arg("--graph");
        if let Some(branch) = branch {
            request = request.arg(branch);
        }
        self.run_read(request).await
    }

    /// Create a commit, staging every change first when `add_all` is set.
    ///
    /// Fails with the tool's "nothing to commit" diagnostic when the index
    /// matches HEAD.
    pub async fn commit(&self, message: &str, add_all: bool) -> Result<String> {
        validate::message("commit message", message)?;

        let session = self.exclusive().await;
        if add_all {
            session
                .run(&CommandRequest::new(GitVerb::Add).arg("-A"))
                .await?;
        }
        session
            .run(&CommandRequest::new(GitVerb::Commit).arg("-m").arg(message))
            .await
    }

    /// Amend the last commit, keeping its message unless a new one is given
    pub async fn amend_commit(&self, message: Option<&str>) -> Result<String> {
        let mut request = CommandRequest::new(GitVerb::Commit).arg("--amend");
        request = match message {
            Some(message) => {
                validate::message("commit message", message)?;
                request.arg("-m").arg(message)
            }
            None => request.arg("--no-edit"),
        };
        self.run_mutating(request).await
    }

    pub async fn cherry_pick(&self, commit_hash: &str) -> Result<String> {
        validate::ref_name("commit", commit_hash)?;
        self.run_mutating(CommandRequest::new(GitVerb::CherryPick).arg(commit_hash))
            .await
    }

    pub async fn reset(&self, reference: &str, mode: ResetMode) -> Result<String> {
        validate::ref_name("ref", reference)?;
        self.run_mutating(
            CommandRequest::new(GitVerb::Reset)
                .arg(mode.flag())
                .arg(reference),
        )
        .await
    }

    /// Revert a commit with the default message
    pub async fn revert(&self, commit_hash: &str) -> Result<String> {
        validate::ref_name("commit", commit_hash)?;
        self.run_mutating(
            CommandRequest::new(GitVerb::Revert)
                .arg("--no-edit")
                .arg(commit_hash),
        )
        .await
    }

    /// Show unstaged changes, or staged ones when `staged` is set
    pub async fn diff(&self, path: Option<&str>, staged: bool) -> Result<String> {
        let mut request = CommandRequest::new(GitVerb::Diff).arg_if(staged, "--cached");
        if let Some(path) = path {
            validate::worktree_path(path)?;
            request = request.arg("--").arg(path);
        }
        self.run_read(request).await
    }
}
