use crate::error::Result;
use crate::git::executor::{CommandRequest, GitVerb};
use crate::git::repository::core::GitRepo;

/// One entry of `git status --porcelain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Staged-side status code (`X`)
    pub index: char,
    /// Working-tree-side status code (`Y`)
    pub worktree: char,
    pub path: String,
    /// Source path of a rename or copy
    pub original_path: Option<String>,
}

impl StatusEntry {
    /// Both sides touched the path during a merge and it is still unresolved
    pub fn is_unmerged(&self) -> bool {
        matches!(
            (self.index, self.worktree),
            ('U', _) | (_, 'U') | ('A', 'A') | ('D', 'D')
        )
    }

    pub fn is_untracked(&self) -> bool {
        self.index == '?' && self.worktree == '?'
    }

    pub fn is_ignored(&self) -> bool {
        self.index == '!' && self.worktree == '!'
    }
}

/// Parse NUL-separated porcelain v1 output (`status --porcelain -z`)
pub(crate) fn parse_porcelain_z(output: &str) -> Vec<StatusEntry> {
    let mut entries = Vec::new();
    let mut fields = output.split('\0').filter(|f| !f.is_empty());

    while let Some(field) = fields.next() {
        let mut chars = field.chars();
        let (Some(index), Some(worktree)) = (chars.next(), chars.next()) else {
            continue;
        };
        let path = field.get(3..).unwrap_or_default().to_string();

        // Renames and copies carry their source path as the following field
        let original_path = if matches!(index, 'R' | 'C') || matches!(worktree, 'R' | 'C') {
            fields.next().map(str::to_string)
        } else {
            None
        };

        entries.push(StatusEntry {
            index,
            worktree,
            path,
            original_path,
        });
    }

    entries
}

impl GitRepo {
    /// Get repository status in porcelain form
    pub async fn status(&self) -> Result<String> {
        self.run_read(CommandRequest::new(GitVerb::Status).arg("--porcelain"))
            .await
    }

    /// Get repository status parsed into entries
    pub async fn status_entries(&self) -> Result<Vec<StatusEntry>> {
        let output = self
            .run_read(
                CommandRequest::new(GitVerb::Status)
                    .arg("--porcelain")
                    .arg("-z"),
            )
            .await?;
        Ok(parse_porcelain_z(&output))
    }
}
