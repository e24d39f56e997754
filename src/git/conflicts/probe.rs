//! Non-destructive merge-conflict detection.
//!
//! A probe runs a trial merge (`--no-commit --no-ff`) of `source` into the
//! checked-out `target`, collects unmerged paths if it fails, and always
//! rolls the merge back with `merge --abort`. The whole probe holds the
//! handle's exclusive lock and runs on its own task, so a caller dropping
//! the future cannot interrupt the rollback.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{GitError, Result};
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::merge::operations::{abort_request, interpret_merge_head, merge_head_probe};
use crate::git::repository::core::{ExclusiveSession, GitRepo};
use crate::git::status::operations::{parse_porcelain_z, StatusEntry};
use crate::git::validate;

/// Files that would conflict if `source` were merged into `target`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub source: String,
    pub target: String,
    pub conflicted: BTreeSet<String>,
}

impl ConflictReport {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicted.is_empty()
    }
}

/// Outcome of the trial merge before rollback
enum TrialOutcome {
    Clean,
    Conflicted(BTreeSet<String>),
    /// The merge failed without leaving unmerged paths behind
    Failed(GitError),
}

fn status_request() -> CommandRequest {
    CommandRequest::new(GitVerb::Status)
        .arg("--porcelain")
        .arg("-z")
}

/// Status that also lists ignored paths, one entry per matching pattern
fn status_with_ignored_request() -> CommandRequest {
    status_request().arg("--ignored=matching")
}

impl GitRepo {
    /// Report which files would conflict if `source` were merged into `target`.
    ///
    /// `target` must be the checked-out branch, with no tracked changes, no
    /// merge in progress and no ignored file at a path `source` tracks. Branch, working tree and index are the same before
    /// and after the call whatever the outcome.
    pub async fn probe_conflicts(&self, source: &str, target: &str) -> Result<ConflictReport> {
        validate::ref_name("source branch", source)?;
        validate::ref_name("target branch", target)?;

        let repo = self.clone();
        let source = source.to_string();
        let target = target.to_string();

        tokio::spawn(async move {
            let session = repo.exclusive().await;
            run_probe(&session, source, target).await
        })
        .await?
    }
}

async fn run_probe(
    session: &ExclusiveSession,
    source: String,
    target: String,
) -> Result<ConflictReport> {
    check_preconditions(session, &source, &target).await?;

    debug!(%source, %target, "starting trial merge");
    let outcome = trial_merge(session, &source).await;
    let rollback = roll_back(session).await;

    let conflicted = match (outcome, rollback) {
        (Ok(TrialOutcome::Clean), Ok(())) => BTreeSet::new(),
        (Ok(TrialOutcome::Conflicted(paths)), Ok(())) => paths,
        (Ok(TrialOutcome::Failed(trial_error)), Ok(())) => return Err(trial_error),
        (Err(e), Ok(())) => return Err(e),
        (outcome, Err(diagnostic)) => {
            let trial_error = match outcome {
                Ok(TrialOutcome::Failed(e)) | Err(e) => Some(Box::new(e)),
                Ok(_) => None,
            };
            error!(%source, %target, "trial merge rollback failed");
            return Err(GitError::ProbeAbort {
                diagnostic,
                trial_error,
            });
        }
    };

    info!(%source, %target, conflicts = conflicted.len(), "conflict probe finished");
    Ok(ConflictReport {
        source,
        target,
        conflicted,
    })
}

async fn check_preconditions(
    session: &ExclusiveSession,
    source: &str,
    target: &str,
) -> Result<()> {
    let current = session
        .run(&CommandRequest::new(GitVerb::Branch).arg("--show-current"))
        .await?;
    let current = current.trim();
    if current != target {
        let found = if current.is_empty() { "a detached HEAD" } else { current };
        return Err(GitError::precondition(format!(
            "target '{target}' must be checked out, found {found}"
        )));
    }

    if interpret_merge_head(session.run(&merge_head_probe()).await)? {
        return Err(GitError::precondition("a merge is already in progress"));
    }

    let (ignored, dirty): (Vec<StatusEntry>, Vec<StatusEntry>) =
        parse_porcelain_z(&session.run(&status_with_ignored_request()).await?)
            .into_iter()
            .filter(|entry| !entry.is_untracked())
            .partition(StatusEntry::is_ignored);

    if !dirty.is_empty() {
        let paths: Vec<String> = dirty.into_iter().map(|entry| entry.path).collect();
        return Err(GitError::precondition(format!(
            "working tree has uncommitted changes: {}",
            paths.join(", ")
        )));
    }

    // A merge overwrites ignored files that `source` tracks, and the abort
    // then deletes them
    if !ignored.is_empty() {
        let listing = session
            .run(
                &CommandRequest::new(GitVerb::LsTree)
                    .arg("-r")
                    .arg("--name-only")
                    .arg(source)
                    .arg("--")
                    .args(ignored.into_iter().map(|entry| entry.path)),
            )
            .await?;
        let shadowed: Vec<&str> = listing.lines().filter(|line| !line.is_empty()).collect();
        if !shadowed.is_empty() {
            return Err(GitError::precondition(format!(
                "ignored files would be overwritten by '{source}': {}",
                shadowed.join(", ")
            )));
        }
    }

    Ok(())
}

async fn trial_merge(session: &ExclusiveSession, source: &str) -> Result<TrialOutcome> {
    let request = CommandRequest::new(GitVerb::Merge)
        .arg("--no-commit")
        .arg("--no-ff")
        .arg(source);

    let merge_error = match session.run(&request).await {
        Ok(_) => return Ok(TrialOutcome::Clean),
        Err(e @ GitError::ExternalTool { .. }) => e,
        Err(e) => return Err(e),
    };

    let conflicted: BTreeSet<String> = parse_porcelain_z(&session.run(&status_request()).await?)
        .into_iter()
        .filter(|entry| entry.is_unmerged())
        .map(|entry| entry.path)
        .collect();

    if conflicted.is_empty() {
        Ok(TrialOutcome::Failed(merge_error))
    } else {
        Ok(TrialOutcome::Conflicted(conflicted))
    }
}

/// Abort the trial merge. `Err` carries the abort diagnostic and is only
/// returned when merge state is still present afterwards.
async fn roll_back(session: &ExclusiveSession) -> std::result::Result<(), String> {
    let abort_error = match session.run(&abort_request()).await {
        Ok(_) => return Ok(()),
        Err(e) => e,
    };

    match interpret_merge_head(session.run(&merge_head_probe()).await) {
        Ok(false) => {
            // The trial never entered merge state ("Already up to date", bad ref)
            warn!(error = %abort_error, "no trial merge to abort");
            Ok(())
        }
        Ok(true) => Err(abort_error
            .diagnostic()
            .map(str::to_string)
            .unwrap_or_else(|| abort_error.to_string())),
        Err(check_error) => Err(format!("{abort_error}; {check_error}")),
    }
}
