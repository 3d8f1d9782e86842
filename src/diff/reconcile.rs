/// The capability-set reconciliation algorithm.
use crate::analyzer::Frame;
use crate::snapshot::{CapabilitySnapshot, SnapshotKey};

/// Which snapshot a difference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Present in current only; rendered with `>`.
    Gained,
    /// Present in baseline only; rendered with `<`.
    Lost,
}

impl Side {
    /// The marker character prefixing every rendered line of an entry.
    #[must_use]
    pub fn marker(self) -> char {
        match self {
            Self::Gained => '>',
            Self::Lost => '<',
        }
    }
}

/// One rendering-ready difference: a capability gained or lost by a package,
/// with the call path justifying it. Borrows from the snapshots; derived,
/// never persisted.
#[derive(Debug, Clone)]
pub struct DiffEntry<'a> {
    /// Gained or lost.
    pub side: Side,
    /// The (capability, package) key that changed.
    pub key: &'a SnapshotKey,
    /// The call path of the side that has the capability: current's for a
    /// gain, baseline's for a loss.
    pub path: &'a [Frame],
}

/// Compute the differences between two snapshots, ordered by capability tag
/// (enumeration order) and then by package key.
///
/// Only presence/absence transitions are reported: a key present in both
/// snapshots yields no entry even when its call paths differ. The key set is
/// collected from both sides and sorted explicitly, so the output never
/// depends on map iteration order and is invariant under permutation of the
/// analyzer's record order. Total over any two snapshots, including empty
/// ones.
#[must_use]
pub fn reconcile<'a>(
    baseline: &'a CapabilitySnapshot,
    current: &'a CapabilitySnapshot,
) -> Vec<DiffEntry<'a>> {
    let mut keys: Vec<&SnapshotKey> = baseline.keys().collect();
    keys.extend(current.keys().filter(|key| !baseline.contains(key)));
    keys.sort();

    let mut entries = Vec::new();
    for key in keys {
        match (baseline.get(key), current.get(key)) {
            (None, Some(record)) => entries.push(DiffEntry {
                side: Side::Gained,
                key,
                path: &record.path,
            }),
            (Some(record), None) => entries.push(DiffEntry {
                side: Side::Lost,
                key,
                path: &record.path,
            }),
            _ => {}
        }
    }
    entries
}
