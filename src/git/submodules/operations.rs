use crate::error::Result;
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::repository::core::GitRepo;
use crate::git::validate;

impl GitRepo {
    pub async fn submodule_update(&self, init: bool, recursive: bool) -> Result<String> {
        self.run_mutating(
            CommandRequest::new(GitVerb::Submodule)
                .arg("update")
                .arg_if(init, "--init")
                .arg_if(recursive, "--recursive"),
        )
        .await
    }

    /// Register `url` as a submodule checked out at `path`
    pub async fn submodule_add(&self, url: &str, path: &str) -> Result<String> {
        validate::ref_name("submodule url", url)?;
        validate::worktree_path(path)?;
        self.run_mutating(
            CommandRequest::new(GitVerb::Submodule)
                .arg("add")
                .arg("--")
                .arg(url)
                .arg(path),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::GitError;
    use crate::test_utils::create_test_repo_with_commit;

    #[tokio::test]
    async fn update_without_submodules_is_a_no_op() {
        let (_temp_dir, repo) = create_test_repo_with_commit();

        assert_eq!(repo.submodule_update(true, true).await.unwrap(), "");
        assert_eq!(repo.status().await.unwrap(), "");
    }

    #[tokio::test]
    async fn add_rejects_escaping_path() {
        let (_temp_dir, repo) = create_test_repo_with_commit();

        let err = repo
            .submodule_add("https://example.com/lib.git", "../lib")
            .await
            .unwrap_err();
        assert!(matches!(err, GitError::Validation { .. }));
    }
}
