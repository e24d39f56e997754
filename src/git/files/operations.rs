use std::path::PathBuf;

use crate::error::{GitError, Result};
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::repository::core::GitRepo;
use crate::git::validate;

impl GitRepo {
    fn worktree_file(&self, path: &str) -> Result<PathBuf> {
        validate::worktree_path(path)?;
        Ok(self.path().join(path))
    }

    /// Add a file to staging
    pub async fn add_file(&self, path: &str) -> Result<String> {
        self.add_files(&[path]).await
    }

    /// Add multiple files to staging in one invocation
    pub async fn add_files(&self, paths: &[&str]) -> Result<String> {
        if paths.is_empty() {
            return Err(GitError::validation("at least one file path is required"));
        }
        for path in paths {
            validate::worktree_path(path)?;
        }

        let request = CommandRequest::new(GitVerb::Add)
            .arg("--")
            .args(paths.iter().copied());
        self.run_mutating(request).await
    }

    /// Unstage a file, keeping its working-tree content
    pub async fn reset_file(&self, path: &str) -> Result<String> {
        validate::worktree_path(path)?;
        self.run_mutating(CommandRequest::new(GitVerb::Reset).arg("--").arg(path))
            .await
    }

    /// Restore a file from `version`, or from HEAD when none is given
    pub async fn checkout_file(&self, path: &str, version: Option<&str>) -> Result<String> {
        validate::worktree_path(path)?;
        let version = version.unwrap_or("HEAD");
        validate::ref_name("version", version)?;

        self.run_mutating(
            CommandRequest::new(GitVerb::Checkout)
                .arg(version)
                .arg("--")
                .arg(path),
        )
        .await
    }

    /// Replace a working-tree file's content, creating parent directories
    pub async fn write_file_content(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.worktree_file(path)?;
        let _session = self.exclusive().await;

        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| GitError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&file_path, content)
            .await
            .map_err(|source| GitError::Io {
                path: file_path.clone(),
                source,
            })
    }

    pub async fn read_file_content(&self, path: &str) -> Result<String> {
        let file_path = self.worktree_file(path)?;
        tokio::fs::read_to_string(&file_path)
            .await
            .map_err(|source| GitError::Io {
                path: file_path.clone(),
                source,
            })
    }

    /// Remove a file from the index and, unless `cached`, from disk
    pub async fn remove_file(&self, path: &str, cached: bool) -> Result<String> {
        validate::worktree_path(path)?;
        self.run_mutating(
            CommandRequest::new(GitVerb::Rm)
                .arg_if(cached, "--cached")
                .arg("--")
                .arg(path),
        )
        .await
    }
}
