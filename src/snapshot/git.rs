/// The git operations acquisition needs, as thin subprocess wrappers.
///
/// Every operation takes the directory to run in explicitly; nothing here
/// touches the process-wide current directory.
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::exec::{ToolCommand, ToolError};

/// Locate the `.git` directory enclosing `dir` (`git rev-parse --git-dir`).
/// The returned path may be relative to `dir`.
///
/// # Errors
///
/// Returns `ToolError` if git fails, e.g. when `dir` is not inside a
/// repository.
pub fn git_dir(dir: &Path, timeout: Option<Duration>) -> Result<PathBuf, ToolError> {
    let stdout = ToolCommand::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(dir)
        .timeout(timeout)
        .output()?;
    Ok(PathBuf::from(trimmed(&stdout)))
}

/// The caller's path relative to the repository root
/// (`git rev-parse --show-prefix`). Empty at the root itself.
///
/// # Errors
///
/// Returns `ToolError` if git fails.
pub fn relative_prefix(dir: &Path, timeout: Option<Duration>) -> Result<PathBuf, ToolError> {
    let stdout = ToolCommand::new("git")
        .args(["rev-parse", "--show-prefix"])
        .current_dir(dir)
        .timeout(timeout)
        .output()?;
    Ok(PathBuf::from(trimmed(&stdout)))
}

/// Create a shared, checkout-less clone of `git_dir` into `target`
/// (`git clone --shared --no-checkout`). Object storage is shared with the
/// source repository; no working tree is populated yet.
///
/// `dir` anchors the invocation so a relative `git_dir` stays meaningful.
///
/// # Errors
///
/// Returns `ToolError` if the clone fails.
pub fn clone_shared(
    git_dir: &Path,
    target: &Path,
    dir: &Path,
    timeout: Option<Duration>,
) -> Result<(), ToolError> {
    ToolCommand::new("git")
        .args(["clone", "--shared", "--no-checkout", "--"])
        .arg(git_dir.display().to_string())
        .arg(target.display().to_string())
        .current_dir(dir)
        .timeout(timeout)
        .run()
}

/// Force the working tree in `worktree` to exactly match `revision`
/// (`git reset --hard`). Discarding pre-existing working-tree state is safe
/// here: the worktree is a freshly created clone owned by one acquisition.
///
/// # Errors
///
/// Returns `ToolError` if the reset fails, e.g. for an unknown revision.
pub fn reset_hard(
    worktree: &Path,
    revision: &str,
    timeout: Option<Duration>,
) -> Result<(), ToolError> {
    ToolCommand::new("git")
        .args(["reset", "--hard", revision])
        .current_dir(worktree)
        .timeout(timeout)
        .run()
}

fn trimmed(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .trim_end_matches('\n')
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // End-to-end: init a repository, commit, and introspect it through the
    // same wrappers acquisition uses.
    fn init_repo(dir: &Path) {
        ToolCommand::new("git")
            .args(["init", "-q"])
            .current_dir(dir)
            .run()
            .unwrap();
        ToolCommand::new("git")
            .args(["config", "user.email", "test@example.com"])
            .current_dir(dir)
            .run()
            .unwrap();
        ToolCommand::new("git")
            .args(["config", "user.name", "test"])
            .current_dir(dir)
            .run()
            .unwrap();
    }

    fn commit_all(dir: &Path, message: &str) {
        ToolCommand::new("git")
            .args(["add", "."])
            .current_dir(dir)
            .run()
            .unwrap();
        ToolCommand::new("git")
            .args(["commit", "-q", "-m", message])
            .current_dir(dir)
            .run()
            .unwrap();
    }

    #[test]
    fn test_git_dir_and_prefix() {
        let repo = tempfile::tempdir().unwrap();
        init_repo(repo.path());
        let sub = repo.path().join("pkg/inner");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(sub.join("f.txt"), "x").unwrap();
        commit_all(repo.path(), "init");

        let prefix = relative_prefix(&sub, None).unwrap();
        assert_eq!(prefix, PathBuf::from("pkg/inner/"));

        let gd = git_dir(&sub, None).unwrap();
        assert!(gd.to_string_lossy().ends_with(".git"));
    }

    #[test]
    fn test_clone_and_reset_materialize_revision() {
        let repo = tempfile::tempdir().unwrap();
        init_repo(repo.path());
        std::fs::write(repo.path().join("a.txt"), "one").unwrap();
        commit_all(repo.path(), "one");

        let gd = git_dir(repo.path(), None).unwrap();
        let clone = tempfile::tempdir().unwrap();
        let target = clone.path().join("ws");
        clone_shared(&gd, &target, repo.path(), None).unwrap();

        // No working tree before the reset.
        assert!(!target.join("a.txt").exists());
        reset_hard(&target, "HEAD", None).unwrap();
        assert_eq!(std::fs::read_to_string(target.join("a.txt")).unwrap(), "one");
    }

    #[test]
    fn test_git_dir_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(git_dir(dir.path(), None).is_err());
    }
}
