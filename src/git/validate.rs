//! Parameter checks applied before any process is spawned.

use std::path::{Component, Path};

use crate::error::{GitError, Result};

/// Check a ref-like argument (branch, tag, remote, commit, stash ref, strategy).
///
/// Rejects values git would read as an option, and values containing
/// whitespace or NUL.
pub(crate) fn ref_name(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(GitError::validation(format!("{kind} must not be empty")));
    }
    if value.starts_with('-') {
        return Err(GitError::validation(format!(
            "{kind} '{value}' must not start with '-'"
        )));
    }
    if value.chars().any(|c| c.is_whitespace() || c == '\0') {
        return Err(GitError::validation(format!(
            "{kind} '{value}' must not contain whitespace"
        )));
    }
    Ok(())
}

pub(crate) fn optional_ref_name(kind: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) => ref_name(kind, v),
        None => Ok(()),
    }
}

/// A path relative to the working tree root that cannot escape it
pub(crate) fn worktree_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GitError::validation("file path must not be empty"));
    }
    if path.contains('\0') {
        return Err(GitError::validation("file path must not contain NUL"));
    }
    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(GitError::validation(format!(
                    "file path '{path}' must not contain '..'"
                )))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(GitError::validation(format!(
                    "file path '{path}' must be relative to the repository"
                )))
            }
        }
    }
    Ok(())
}

pub(crate) fn message(kind: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GitError::validation(format!("{kind} must not be empty")));
    }
    Ok(())
}

/// Remote and branch travel together: both or neither
pub(crate) fn remote_branch_pair<'a>(
    remote: Option<&'a str>,
    branch: Option<&'a str>,
) -> Result<Option<(&'a str, &'a str)>> {
    match (remote, branch) {
        (Some(remote), Some(branch)) => {
            ref_name("remote", remote)?;
            ref_name("branch", branch)?;
            Ok(Some((remote, branch)))
        }
        (None, None) => Ok(None),
        (Some(_), None) => Err(GitError::validation(
            "a remote was given without a branch; supply both or neither",
        )),
        (None, Some(_)) => Err(GitError::validation(
            "a branch was given without a remote; supply both or neither",
        )),
    }
}
