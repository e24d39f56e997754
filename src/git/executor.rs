//! Bounded, cancellable execution of `git` invocations.
//!
//! Every invocation runs as a child process of the configured git binary.
//! At most `max_workers` children run at once per executor; further requests
//! wait for a permit. Dropping the returned future kills the child and frees
//! its permit, so callers can impose their own deadlines without leaking a
//! stuck worker.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::config::ExecutorConfig;
use crate::error::{GitError, Result};

/// The closed set of git subcommands this crate will ever invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitVerb {
    Add,
    Branch,
    Checkout,
    CherryPick,
    Commit,
    Config,
    Diff,
    Fetch,
    Flow,
    Log,
    LsTree,
    Merge,
    Pull,
    Push,
    Rebase,
    Remote,
    Reset,
    RevParse,
    Revert,
    Rm,
    Stash,
    Status,
    Submodule,
    Tag,
}

impl GitVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            GitVerb::Add => "add",
            GitVerb::Branch => "branch",
            GitVerb::Checkout => "checkout",
            GitVerb::CherryPick => "cherry-pick",
            GitVerb::Commit => "commit",
            GitVerb::Config => "config",
            GitVerb::Diff => "diff",
            GitVerb::Fetch => "fetch",
            GitVerb::Flow => "flow",
            GitVerb::Log => "log",
            GitVerb::LsTree => "ls-tree",
            GitVerb::Merge => "merge",
            GitVerb::Pull => "pull",
            GitVerb::Push => "push",
            GitVerb::Rebase => "rebase",
            GitVerb::Remote => "remote",
            GitVerb::Reset => "reset",
            GitVerb::RevParse => "rev-parse",
            GitVerb::Revert => "revert",
            GitVerb::Rm => "rm",
            GitVerb::Stash => "stash",
            GitVerb::Status => "status",
            GitVerb::Submodule => "submodule",
            GitVerb::Tag => "tag",
        }
    }
}

/// A single git invocation: a verb plus its ordered arguments.
///
/// Requests can only be assembled inside this crate, by the typed operations
/// on [`crate::GitRepo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    verb: GitVerb,
    args: Vec<String>,
}

impl CommandRequest {
    pub(crate) fn new(verb: GitVerb) -> Self {
        Self {
            verb,
            args: Vec::new(),
        }
    }

    pub(crate) fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub(crate) fn arg_if(self, condition: bool, arg: impl Into<String>) -> Self {
        if condition {
            self.arg(arg)
        } else {
            self
        }
    }

    pub(crate) fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn verb(&self) -> GitVerb {
        self.verb
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb.as_str())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs git invocations against one working directory on a bounded pool
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    git_binary: PathBuf,
    workdir: PathBuf,
    permits: Arc<Semaphore>,
    max_workers: usize,
}

impl CommandExecutor {
    pub fn new<P: AsRef<Path>>(workdir: P, config: &ExecutorConfig) -> Self {
        let max_workers = config.max_workers.max(1);
        Self {
            git_binary: config.git_binary.clone(),
            workdir: workdir.as_ref().to_path_buf(),
            permits: Arc::new(Semaphore::new(max_workers)),
            max_workers,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Invocations currently allowed to start without waiting
    pub fn available_workers(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `request` and return its stdout.
    ///
    /// A non-zero exit becomes [`GitError::ExternalTool`] with stderr and
    /// stdout preserved verbatim. Nothing is retried.
    pub async fn execute(&self, request: &CommandRequest) -> Result<String> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| GitError::ExecutorClosed)?;

        debug!(command = %request, workdir = %self.workdir.display(), "running git");

        let output = Command::new(&self.git_binary)
            .arg("-C")
            .arg(&self.workdir)
            .arg(request.verb.as_str())
            .args(&request.args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| GitError::Spawn {
                program: self.git_binary.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if output.status.success() {
            debug!(command = %request, "git succeeded");
            Ok(stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            debug!(command = %request, status = ?output.status.code(), "git failed");
            Err(GitError::ExternalTool {
                command: request.to_string(),
                status: output.status.code(),
                stderr,
                stdout,
            })
        }
    }

    /// Like [`execute`](Self::execute), but gives up after `deadline`.
    ///
    /// On timeout the child process is killed and its worker released.
    pub async fn execute_with_deadline(
        &self,
        request: &CommandRequest,
        deadline: Duration,
    ) -> Result<String> {
        match tokio::time::timeout(deadline, self.execute(request)).await {
            Ok(result) => result,
            Err(_) => Err(GitError::Timeout {
                command: request.to_string(),
                after: deadline,
            }),
        }
    }
}
