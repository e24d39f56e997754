use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by repository operations and the conflict probe
#[derive(Error, Debug)]
pub enum GitError {
    #[error("invalid parameters: {reason}")]
    Validation { reason: String },

    #[error("cannot bind repository at {}: {reason}", path.display())]
    RepositoryBinding { path: PathBuf, reason: String },

    #[error("`git {command}` failed{}: {}", exit_suffix(*status), diagnostic_text(stderr, stdout).trim_end())]
    ExternalTool {
        command: String,
        status: Option<i32>,
        stderr: String,
        stdout: String,
    },

    #[error("failed to roll back trial merge, working tree may still be mid-merge: {}", diagnostic.trim_end())]
    ProbeAbort {
        diagnostic: String,
        trial_error: Option<Box<GitError>>,
    },

    #[error("conflict probe precondition violated: {reason}")]
    Precondition { reason: String },

    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`git {command}` did not finish within {after:?}")]
    Timeout { command: String, after: Duration },

    #[error("file operation on {} failed: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("command executor has been shut down")]
    ExecutorClosed,

    #[error("background task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, GitError>;

impl GitError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        GitError::Validation {
            reason: reason.into(),
        }
    }

    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        GitError::Precondition {
            reason: reason.into(),
        }
    }

    /// The tool's own explanation of a failed invocation, verbatim.
    ///
    /// git writes most failures to stderr, but some (e.g. "nothing to commit"
    /// or merge CONFLICT lines) only reach stdout.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            GitError::ExternalTool { stderr, stdout, .. } => Some(diagnostic_text(stderr, stdout)),
            GitError::ProbeAbort { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }

    pub fn is_external_tool(&self) -> bool {
        matches!(self, GitError::ExternalTool { .. })
    }
}

fn diagnostic_text<'a>(stderr: &'a str, stdout: &'a str) -> &'a str {
    if stderr.trim().is_empty() {
        stdout
    } else {
        stderr
    }
}

fn exit_suffix(status: Option<i32>) -> String {
    match status {
        Some(code) => format!(" with exit code {code}"),
        None => " (terminated by signal)".to_string(),
    }
}
