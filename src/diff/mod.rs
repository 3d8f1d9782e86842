/// Reconciliation core: compute and render the gained/lost capabilities
/// between two snapshots.
pub mod reconcile;
pub mod render;

pub use reconcile::{DiffEntry, Side, reconcile};
pub use render::{render_entry, render_report};
