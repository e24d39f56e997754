use std::path::{Path, PathBuf};
use std::sync::Arc;

use git2::Repository;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::config::ExecutorConfig;
use crate::error::{GitError, Result};
use crate::git::executor::{CommandExecutor, CommandRequest};

/// Handle to one on-disk working copy.
///
/// Clones share the same worker pool and the same mutation lock, so they act
/// as one logical session against the repository.
#[derive(Debug, Clone)]
pub struct GitRepo {
    path: PathBuf,
    executor: CommandExecutor,
    mutation_lock: Arc<Mutex<()>>,
}

/// Exclusive access to a repository's working tree and index.
///
/// Holding a session blocks every other mutating operation and conflict
/// probe on the same handle until it is dropped.
pub(crate) struct ExclusiveSession {
    executor: CommandExecutor,
    _guard: OwnedMutexGuard<()>,
}

impl ExclusiveSession {
    pub(crate) async fn run(&self, request: &CommandRequest) -> Result<String> {
        self.executor.execute(request).await
    }
}

impl GitRepo {
    /// Open a git repository at the specified path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, &ExecutorConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(path: P, config: &ExecutorConfig) -> Result<Self> {
        let path_ref = path.as_ref();
        let repo = Repository::open(path_ref).map_err(|e| GitError::RepositoryBinding {
            path: path_ref.to_path_buf(),
            reason: e.message().to_string(),
        })?;

        if repo.is_bare() {
            return Err(GitError::RepositoryBinding {
                path: path_ref.to_path_buf(),
                reason: "bare repository has no working tree".to_string(),
            });
        }

        debug!(path = %path_ref.display(), "bound repository");
        Ok(Self::bind(path_ref, config))
    }

    /// Initialize a new repository whose HEAD points at `master`
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let binding_error = |reason: String| GitError::RepositoryBinding {
            path: path_ref.to_path_buf(),
            reason,
        };

        // Check if it's already a git repository
        if Repository::open(path_ref).is_ok() {
            return Err(binding_error(
                "directory is already a git repository".to_string(),
            ));
        }

        let repo = Repository::init(path_ref).map_err(|e| binding_error(e.message().to_string()))?;

        // The master branch is created by the first commit
        repo.set_head("refs/heads/master")
            .map_err(|e| binding_error(e.message().to_string()))?;

        Ok(Self::bind(path_ref, &ExecutorConfig::default()))
    }

    fn bind(path: &Path, config: &ExecutorConfig) -> Self {
        Self {
            path: path.to_path_buf(),
            executor: CommandExecutor::new(path, config),
            mutation_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the path to the repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    /// Run a read-only request; these may overlap freely up to the pool bound
    pub(crate) async fn run_read(&self, request: CommandRequest) -> Result<String> {
        self.executor.execute(&request).await
    }

    /// Run a single mutating request under the exclusive lock
    pub(crate) async fn run_mutating(&self, request: CommandRequest) -> Result<String> {
        let session = self.exclusive().await;
        session.run(&request).await
    }

    pub(crate) async fn exclusive(&self) -> ExclusiveSession {
        ExclusiveSession {
            executor: self.executor.clone(),
            _guard: Arc::clone(&self.mutation_lock).lock_owned().await,
        }
    }
}
