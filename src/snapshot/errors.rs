/// Errors from snapshot acquisition.
use std::path::PathBuf;

use thiserror::Error;

use crate::analyzer::AnalysisError;
use crate::exec::ToolError;

/// A snapshot could not be acquired. Each variant tags the acquisition step
/// that failed and carries the underlying cause.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The caller's current directory could not be resolved.
    #[error("resolving current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// A temporary workspace could not be created.
    #[error("creating temporary workspace: {0}")]
    Workspace(#[source] std::io::Error),

    /// The enclosing git directory could not be located.
    #[error("locating git directory: {0}")]
    GitDir(#[source] ToolError),

    /// The caller's path relative to the repository root could not be
    /// determined.
    #[error("determining repository prefix: {0}")]
    Prefix(#[source] ToolError),

    /// The repository could not be cloned into the workspace.
    #[error("cloning repository into workspace: {0}")]
    Clone(#[source] ToolError),

    /// The workspace's working tree could not be reset to the revision.
    #[error("checking out revision '{revision}': {source}")]
    Checkout {
        /// The requested revision.
        revision: String,
        /// The underlying tool failure.
        source: ToolError,
    },

    /// The caller's relative path does not exist at the requested revision.
    #[error("package directory '{}' does not exist at the requested revision", .path.display())]
    MissingPackageDir {
        /// The path inside the workspace that was expected.
        path: PathBuf,
    },

    /// A fresh module manifest could not be initialized in the workspace.
    #[error("initializing module workspace: {0}")]
    ModInit(#[source] ToolError),

    /// The pinned package version could not be fetched.
    #[error("fetching '{package}': {source}")]
    Fetch {
        /// The `module@version` reference that failed.
        package: String,
        /// The underlying tool failure.
        source: ToolError,
    },

    /// The analyzer failed or produced unusable output.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// CLI exit code for any acquisition or analysis failure. Distinct from 1,
/// which means "differences found".
pub const EXIT_ERROR: i32 = 2;
