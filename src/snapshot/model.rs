/// The in-memory capability snapshot: one analyzer run's findings keyed by
/// (capability, package).
use std::collections::BTreeMap;

use crate::analyzer::{Capability, CapabilityRecord, CapabilityReport};

/// The key uniquely identifying one finding within a snapshot.
///
/// Derived `Ord` sorts by capability first (in the analyzer's enumeration
/// order), then by package key lexicographically; reconciliation reports
/// inherit exactly this order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotKey {
    /// The capability tag.
    pub capability: Capability,
    /// The package directory exhibiting it.
    pub package: String,
}

impl SnapshotKey {
    /// Build the key for a record.
    #[must_use]
    pub fn of(record: &CapabilityRecord) -> Self {
        Self {
            capability: record.capability,
            package: record.package_dir.clone(),
        }
    }
}

/// The full set of capability findings from one analyzer run against one
/// source state.
///
/// Within a snapshot, a key maps to at most one record. The analyzer is not
/// expected to emit duplicate keys, but if it does the later record wins.
#[derive(Debug, Clone, Default)]
pub struct CapabilitySnapshot {
    records: BTreeMap<SnapshotKey, CapabilityRecord>,
}

impl CapabilitySnapshot {
    /// Build a snapshot from a parsed analyzer report.
    #[must_use]
    pub fn from_report(report: CapabilityReport) -> Self {
        let mut snapshot = Self::default();
        for record in report.records {
            snapshot.insert(record);
        }
        snapshot
    }

    /// Insert a record, overwriting any previous record with the same key.
    pub fn insert(&mut self, record: CapabilityRecord) {
        self.records.insert(SnapshotKey::of(&record), record);
    }

    /// Look up the record for a key.
    #[must_use]
    pub fn get(&self, key: &SnapshotKey) -> Option<&CapabilityRecord> {
        self.records.get(key)
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains(&self, key: &SnapshotKey) -> bool {
        self.records.contains_key(key)
    }

    /// Iterate over the keys present in this snapshot.
    pub fn keys(&self) -> impl Iterator<Item = &SnapshotKey> {
        self.records.keys()
    }

    /// Number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot has no findings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
