/// Ephemeral workspaces: isolated temporary directories, one per
/// acquisition, deleted when dropped.
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempDir};
use tracing::debug;

use super::errors::AcquireError;

/// Environment variable overriding the base directory for workspaces.
pub const TMPDIR_ENV: &str = "CAPDIFF_TMPDIR";

/// An isolated temporary directory owned by exactly one acquisition.
///
/// The directory is removed when the `Workspace` is dropped, on success and
/// error paths alike, unless it was created with `retain` — then it survives
/// for inspection and its path is logged.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    // Present iff the directory should be deleted on drop.
    dir: Option<TempDir>,
}

impl Workspace {
    /// Create a workspace under the [`TMPDIR_ENV`] override when set and
    /// non-empty, else under the platform temp directory.
    ///
    /// # Errors
    ///
    /// Returns `AcquireError::Workspace` if the directory cannot be created.
    pub fn create(retain: bool) -> Result<Self, AcquireError> {
        Self::create_in(base_override().as_deref(), retain)
    }

    /// Create a workspace under `base`, or the platform temp directory when
    /// `base` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `AcquireError::Workspace` if the directory cannot be created.
    pub fn create_in(base: Option<&Path>, retain: bool) -> Result<Self, AcquireError> {
        let dir = match base {
            Some(base) => Builder::new().prefix("capdiff-").tempdir_in(base),
            None => Builder::new().prefix("capdiff-").tempdir(),
        }
        .map_err(AcquireError::Workspace)?;
        debug!(path = %dir.path().display(), "created workspace");

        if retain {
            let path = dir.keep();
            debug!(path = %path.display(), "retaining workspace after use");
            Ok(Self { path, dir: None })
        } else {
            Ok(Self {
                path: dir.path().to_path_buf(),
                dir: Some(dir),
            })
        }
    }

    /// The workspace's root directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Whether the directory will outlive this value.
    #[must_use]
    pub fn is_retained(&self) -> bool {
        self.dir.is_none()
    }
}

/// The workspace base-directory override, when set and non-empty.
#[must_use]
pub fn base_override() -> Option<PathBuf> {
    std::env::var_os(TMPDIR_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
