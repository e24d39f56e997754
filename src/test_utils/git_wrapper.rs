use std::path::{Path, PathBuf};

/// Write an executable `sh` script to `dir` that stands in for the git binary.
///
/// `body` runs with the original arguments in `$@` and usually ends in
/// `exec git "$@"`.
pub fn write_git_wrapper(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("git-wrapper.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
