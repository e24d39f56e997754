use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use git2::{Repository, RepositoryState, Signature};

use crate::git::GitRepo;

/// Create a new temporary repository for testing with user config set up
pub fn create_test_repo() -> (assert_fs::TempDir, GitRepo) {
    let temp_dir = assert_fs::TempDir::new().unwrap();
    let path = temp_dir.path();
    let repo = GitRepo::init(path).unwrap();
    repo.set_user_config("Test User", "test@example.com")
        .unwrap();
    (temp_dir, repo)
}

/// Create a repository with one commit on `master` holding `README.md`
pub fn create_test_repo_with_commit() -> (assert_fs::TempDir, GitRepo) {
    let (temp_dir, repo) = create_test_repo();
    repo.create_file_and_commit("README.md", "initial\n", "Initial commit")
        .unwrap();
    (temp_dir, repo)
}

/// Everything a conflict probe promises to leave untouched
#[derive(Debug, PartialEq)]
pub struct RepoSnapshot {
    pub head: Option<String>,
    pub head_oid: Option<String>,
    pub state: RepositoryState,
    pub files: BTreeMap<PathBuf, Vec<u8>>,
    pub index: Vec<(Vec<u8>, String)>,
}

/// Test-only trait that adds assertion methods to GitRepo
pub trait RepoAssertions {
    /// Assert that HEAD's symbolic target matches the expected value
    fn assert_head_symbolic_target(&self, expected_target: &str) -> &Self;

    /// Assert that the current branch matches the expected branch name
    fn assert_current_branch(&self, branch_name: &str) -> &Self;

    /// Assert that a file exists in the repository
    fn assert_file_exists(&self, filename: &str) -> &Self;

    /// Assert that a file does not exist in the repository
    fn assert_file_not_exists(&self, filename: &str) -> &Self;

    /// Assert that commit messages match the expected order (newest first)
    fn assert_commit_messages(&self, expected_messages: &[&str]) -> &Self;

    /// Assert no merge, rebase or cherry-pick is in progress
    fn assert_clean_state(&self) -> &Self;
}

/// Test-only trait that adds fixture operations to GitRepo, all through git2
pub trait RepoTestOperations {
    fn set_user_config(&self, name: &str, email: &str) -> Result<&Self, Error>;

    /// Write a file with content (fluent)
    fn create_file(&self, filename: &str, content: &str) -> Result<&Self, Error>;

    /// Write a file and commit it in one operation (fluent)
    fn create_file_and_commit(
        &self,
        filename: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<&Self, Error>;

    /// Stage the given paths (fluent)
    fn stage(&self, pathspecs: &[&str]) -> Result<&Self, Error>;

    /// Commit the index on top of HEAD (fluent)
    fn commit_index(&self, message: &str) -> Result<&Self, Error>;

    /// Create a branch at HEAD without switching to it (fluent)
    fn create_branch_at_head(&self, branch_name: &str) -> Result<&Self, Error>;

    fn commit_messages(&self) -> Result<Vec<String>, Error>;

    fn snapshot(&self) -> Result<RepoSnapshot, Error>;
}

fn open(repo: &GitRepo) -> Result<Repository, Error> {
    Repository::open(repo.path()).context("Cannot open git repo at given path")
}

fn create_signature(repo: &Repository) -> Result<Signature<'static>, Error> {
    let config = repo.config().context("Failed to get repository config")?;

    let author_name = config
        .get_string("user.name")
        .context("Failed to get user.name from git config")?;
    let author_email = config
        .get_string("user.email")
        .context("Failed to get user.email from git config")?;

    Signature::now(&author_name, &author_email)
        .context("Failed to create signature with git config values")
}

fn collect_files(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, Vec<u8>>) -> Result<(), Error> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_name() == ".git" {
            continue;
        }
        if entry.file_type()?.is_dir() {
            collect_files(root, &path, files)?;
        } else {
            let relative = path.strip_prefix(root)?.to_path_buf();
            files.insert(relative, std::fs::read(&path)?);
        }
    }
    Ok(())
}

impl RepoAssertions for GitRepo {
    fn assert_head_symbolic_target(&self, expected_target: &str) -> &Self {
        let repo = open(self).unwrap();
        let head_ref = repo.find_reference("HEAD").unwrap();
        match head_ref.symbolic_target() {
            Some(actual_target) => {
                if actual_target != expected_target {
                    panic!(
                        "HEAD symbolic target mismatch. Expected: '{expected_target}', Found: '{actual_target}'"
                    );
                }
            }
            None => panic!("HEAD is not a symbolic reference"),
        }
        self
    }

    fn assert_current_branch(&self, branch_name: &str) -> &Self {
        let expected_target = format!("refs/heads/{branch_name}");
        self.assert_head_symbolic_target(&expected_target);
        self
    }

    fn assert_file_exists(&self, filename: &str) -> &Self {
        let file_path = self.path().join(filename);
        if !file_path.exists() {
            panic!("Expected file '{filename}' to exist at path: {file_path:?}");
        }
        self
    }

    fn assert_file_not_exists(&self, filename: &str) -> &Self {
        let file_path = self.path().join(filename);
        if file_path.exists() {
            panic!("Expected file '{filename}' to not exist at path: {file_path:?}");
        }
        self
    }

    fn assert_commit_messages(&self, expected_messages: &[&str]) -> &Self {
        let messages = self.commit_messages().unwrap_or_default();

        if messages.len() != expected_messages.len() {
            panic!(
                "Expected {} commits, but found {}. Commits: {:?}",
                expected_messages.len(),
                messages.len(),
                messages
            );
        }

        for (i, (message, expected)) in messages.iter().zip(expected_messages.iter()).enumerate() {
            if message.trim_end() != *expected {
                panic!("Commit {i} message mismatch. Expected: '{expected}', Found: '{message}'");
            }
        }

        self
    }

    fn assert_clean_state(&self) -> &Self {
        let state = open(self).unwrap().state();
        if state != RepositoryState::Clean {
            panic!("Expected clean repository state, found {state:?}");
        }
        self
    }
}

impl RepoTestOperations for GitRepo {
    fn set_user_config(&self, name: &str, email: &str) -> Result<&Self, Error> {
        let repo = open(self)?;
        let config = repo.config().context("Failed to get repository config")?;
        let mut local = config
            .open_level(git2::ConfigLevel::Local)
            .context("Failed to open local config")?;
        local.set_str("user.name", name)?;
        local.set_str("user.email", email)?;
        local.set_bool("commit.gpgsign", false)?;
        Ok(self)
    }

    fn create_file(&self, filename: &str, content: &str) -> Result<&Self, Error> {
        let file_path = self.path().join(filename);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(file_path, content)?;
        Ok(self)
    }

    fn create_file_and_commit(
        &self,
        filename: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<&Self, Error> {
        self.create_file(filename, content)?
            .stage(&[filename])?
            .commit_index(commit_message)?;

        Ok(self)
    }

    fn stage(&self, pathspecs: &[&str]) -> Result<&Self, Error> {
        let repo = open(self)?;
        let mut index = repo.index().context("Failed to get repository index")?;

        index
            .add_all(pathspecs, git2::IndexAddOption::DEFAULT, None)
            .context("Failed to add files to index")?;
        index.write().context("Failed to write index")?;

        Ok(self)
    }

    fn commit_index(&self, message: &str) -> Result<&Self, Error> {
        let repo = open(self)?;
        let signature = create_signature(&repo)?;

        let mut index = repo.index().context("Failed to get repository index")?;
        let tree_id = index
            .write_tree()
            .context("Failed to write tree from index")?;
        let tree = repo.find_tree(tree_id).context("Failed to find tree")?;

        // First commit has no parent
        let parent_commit = match repo.head() {
            Ok(head) => Some(head.peel_to_commit().context("Failed to find parent commit")?),
            Err(_) => None,
        };
        let parents: Vec<_> = parent_commit.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )
        .context("Failed to create commit")?;

        Ok(self)
    }

    fn create_branch_at_head(&self, branch_name: &str) -> Result<&Self, Error> {
        let repo = open(self)?;
        let head = repo
            .head()
            .context("Failed to get HEAD")?
            .peel_to_commit()
            .context("Failed to find HEAD commit")?;
        repo.branch(branch_name, &head, false)
            .context("Failed to create branch")?;
        Ok(self)
    }

    fn commit_messages(&self) -> Result<Vec<String>, Error> {
        let repo = open(self)?;
        if repo.head().is_err() {
            return Ok(Vec::new());
        }

        let mut revwalk = repo.revwalk().context("Failed to create revwalk")?;
        revwalk
            .set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)
            .context("Failed to set sorting")?;
        revwalk.push_head().context("Failed to push HEAD")?;

        let mut messages = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?).context("Failed to find commit")?;
            messages.push(commit.message().unwrap_or("").to_string());
        }
        Ok(messages)
    }

    fn snapshot(&self) -> Result<RepoSnapshot, Error> {
        let repo = open(self)?;

        let head_ref = repo.find_reference("HEAD")?;
        let head = head_ref.symbolic_target().map(str::to_string);
        let head_oid = repo
            .head()
            .ok()
            .and_then(|h| h.target())
            .map(|oid| oid.to_string());

        let mut files = BTreeMap::new();
        collect_files(self.path(), self.path(), &mut files)?;

        let index = repo
            .index()?
            .iter()
            .map(|entry| (entry.path, entry.id.to_string()))
            .collect();

        Ok(RepoSnapshot {
            head,
            head_oid,
            state: repo.state(),
            files,
            index,
        })
    }
}
