/// Snapshot layer: acquiring an isolated source state and the capability
/// snapshot produced by analyzing it.
pub mod acquire;
pub mod errors;
pub mod git;
pub mod model;
pub mod workspace;

pub use acquire::{AcquireOptions, CURRENT_TREE, acquire_at_revision, fetch_into_workspace};
pub use errors::{AcquireError, EXIT_ERROR};
pub use model::{CapabilitySnapshot, SnapshotKey};
pub use workspace::Workspace;
