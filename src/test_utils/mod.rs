#[cfg(unix)]
pub mod git_wrapper;
pub mod repo_extensions;

#[cfg(unix)]
pub use git_wrapper::write_git_wrapper;
pub use repo_extensions::{
    create_test_repo, create_test_repo_with_commit, RepoAssertions, RepoTestOperations,
};
