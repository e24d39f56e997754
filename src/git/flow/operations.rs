//! git-flow branching model commands.
//!
//! These dispatch to the `git flow` extension, which must be installed
//! alongside the configured git binary.

use crate::error::Result;
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::repository::core::GitRepo;
use crate::git::validate;

fn flow(args: &[&str]) -> CommandRequest {
    CommandRequest::new(GitVerb::Flow).args(args.iter().copied())
}

impl GitRepo {
    /// Initialize git-flow with its default branch names and prefixes
    pub async fn flow_init(&self) -> Result<String> {
        self.run_mutating(flow(&["init", "-d"])).await
    }

    pub async fn flow_feature_start(&self, name: &str) -> Result<String> {
        validate::ref_name("feature name", name)?;
        self.run_mutating(flow(&["feature", "start", name])).await
    }

    /// Merge the feature back into the development branch and delete it
    pub async fn flow_feature_finish(&self, name: &str) -> Result<String> {
        validate::ref_name("feature name", name)?;
        self.run_mutating(flow(&["feature", "finish", name])).await
    }

    pub async fn flow_release_start(&self, version: &str) -> Result<String> {
        validate::ref_name("release version", version)?;
        self.run_mutating(flow(&["release", "start", version])).await
    }

    /// Finish a release, tagging it with the version as the tag message
    pub async fn flow_release_finish(&self, version: &str) -> Result<String> {
        validate::ref_name("release version", version)?;
        self.run_mutating(flow(&["release", "finish", "-m", version, version]))
            .await
    }
}
