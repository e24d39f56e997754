//! Git operations module
//!
//! Every operation is a typed translation to a `git` invocation dispatched
//! through the handle's bounded [`executor::CommandExecutor`]:
//!
//! - `repository`: Binding a handle to a working copy, tags and config
//! - `status`: Porcelain status, raw and parsed
//! - `branches`: Branch listing, creation, deletion and checkout
//! - `commits`: Commit, log, diff, reset, revert and cherry-pick
//! - `merge`: Merge, rebase and merge-state inspection
//! - `flow`: git-flow feature and release branches
//! - `stash`: Stash push, list, pop, apply, drop and show
//! - `remotes`: Fetch, pull, push and remote listing
//! - `files`: Per-file staging, checkout, removal and content access
//! - `submodules`: Submodule update and add
//! - `conflicts`: Non-destructive merge-conflict probe

pub mod branches;
pub mod commits;
pub mod conflicts;
pub mod executor;
pub mod files;
pub mod flow;
pub mod merge;
pub mod remotes;
pub mod repository;
pub mod stash;
pub mod status;
pub mod submodules;
pub(crate) mod validate;

// Re-export the main types
pub use commits::operations::ResetMode;
pub use conflicts::probe::ConflictReport;
pub use executor::{CommandExecutor, CommandRequest, GitVerb};
pub use repository::core::GitRepo;
pub use status::operations::StatusEntry;
