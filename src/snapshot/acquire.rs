/// Snapshot acquisition: materialize a source state, analyze it, and parse
/// the result into a [`CapabilitySnapshot`].
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use super::errors::AcquireError;
use super::git;
use super::model::CapabilitySnapshot;
use super::workspace::Workspace;
use crate::analyzer::{self, AnalyzerOptions};
use crate::exec::ToolCommand;

/// Reserved revision meaning "the caller's current working tree". Acquiring
/// it skips workspace creation and every VCS operation.
pub const CURRENT_TREE: &str = ".";

/// Settings shared by all acquisitions of one comparison.
#[derive(Debug, Clone, Default)]
pub struct AcquireOptions {
    /// Flags forwarded to the analyzer.
    pub analyzer: AnalyzerOptions,
    /// Per-subprocess timeout. `None` blocks until the tool exits.
    pub timeout: Option<Duration>,
    /// Keep workspaces on disk after use, for inspection.
    pub retain_workspaces: bool,
}

/// Acquire the capability snapshot of the packages selected by `selector`
/// at `revision`.
///
/// For the [`CURRENT_TREE`] sentinel the analyzer runs directly in the
/// caller's current directory. For any other revision the repository history
/// is cloned (shared, checkout-less) into a fresh workspace, the working
/// tree is forced to the revision, and the analyzer runs in the directory
/// matching the caller's position within the repository, so that relative
/// package selectors keep their meaning.
///
/// Each subprocess receives its working directory explicitly; the process
/// current directory is never changed.
///
/// # Errors
///
/// Returns `AcquireError` tagged with the acquisition step that failed, or
/// wrapping the analyzer failure.
pub fn acquire_at_revision(
    revision: &str,
    selector: &str,
    options: &AcquireOptions,
) -> Result<CapabilitySnapshot, AcquireError> {
    let cwd = std::env::current_dir().map_err(AcquireError::CurrentDir)?;
    acquire_in(&cwd, revision, selector, options)
}

// Same as `acquire_at_revision`, anchored at an explicit caller directory.
fn acquire_in(
    cwd: &Path,
    revision: &str,
    selector: &str,
    options: &AcquireOptions,
) -> Result<CapabilitySnapshot, AcquireError> {
    debug!(revision, selector, "acquiring snapshot");
    if revision == CURRENT_TREE {
        return analyze_in(cwd, selector, options);
    }

    let workspace = Workspace::create(options.retain_workspaces)?;

    let git_dir = git::git_dir(cwd, options.timeout).map_err(AcquireError::GitDir)?;
    debug!(git_dir = %git_dir.display(), "located git directory");
    let prefix = git::relative_prefix(cwd, options.timeout).map_err(AcquireError::Prefix)?;
    debug!(prefix = %prefix.display(), "current path in repository");

    git::clone_shared(&git_dir, workspace.path(), cwd, options.timeout)
        .map_err(AcquireError::Clone)?;
    git::reset_hard(workspace.path(), revision, options.timeout).map_err(|source| {
        AcquireError::Checkout {
            revision: revision.to_owned(),
            source,
        }
    })?;

    let package_dir = workspace.path().join(&prefix);
    if !package_dir.is_dir() {
        return Err(AcquireError::MissingPackageDir { path: package_dir });
    }
    analyze_in(&package_dir, selector, options)
}

/// Create a workspace holding a pinned package version: a fresh module
/// manifest plus a fetch of `package_at_version` (`module@version`).
///
/// The returned workspace is exclusively owned by the caller and cleaned up
/// when dropped, so it must be kept alive for as long as the analyzer needs
/// its contents.
///
/// # Errors
///
/// Returns `AcquireError` if workspace creation, manifest initialization, or
/// the fetch fails.
pub fn fetch_into_workspace(
    package_at_version: &str,
    options: &AcquireOptions,
) -> Result<Workspace, AcquireError> {
    debug!(package = package_at_version, "creating module workspace");
    let workspace = Workspace::create(options.retain_workspaces)?;

    ToolCommand::new("go")
        .args(["mod", "init", "capdiffworkspace"])
        .current_dir(workspace.path())
        .timeout(options.timeout)
        .run()
        .map_err(AcquireError::ModInit)?;
    ToolCommand::new("go")
        .args(["get", package_at_version])
        .current_dir(workspace.path())
        .timeout(options.timeout)
        .run()
        .map_err(|source| AcquireError::Fetch {
            package: package_at_version.to_owned(),
            source,
        })?;

    Ok(workspace)
}

fn analyze_in(
    dir: &Path,
    selector: &str,
    options: &AcquireOptions,
) -> Result<CapabilitySnapshot, AcquireError> {
    let report = analyzer::analyze(dir, selector, &options.analyzer, options.timeout)?;
    Ok(CapabilitySnapshot::from_report(report))
}
