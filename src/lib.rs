//! Concurrency-safe, asynchronous access to git working copies.
//!
//! A [`GitRepo`] binds a bounded pool of `git` invocations to one repository.
//! Operations are a closed, typed catalog; mutating ones serialize on a
//! per-handle lock while read-only ones run in parallel. The
//! [`GitRepo::probe_conflicts`] operation reports which files a merge would
//! conflict on and rolls the trial merge back before returning.

pub mod config;
pub mod error;
pub mod git;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{ExecutorConfig, StudioConfig};
pub use error::{GitError, Result};
pub use git::{CommandRequest, ConflictReport, GitRepo, GitVerb, ResetMode, StatusEntry};
