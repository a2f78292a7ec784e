//! Merging of directional transfer results into one deduplicated set.
//!
//! Outgoing records are inserted before incoming ones. On a key collision
//! the first record seen is kept and later ones are discarded, so the
//! sample order is stable for a given pair of inputs.

use std::collections::HashSet;

use crate::transfers::types::{TransferKey, TransferRecord};

/// Transfers with set semantics over `(hash, category)`, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferSet {
    records: Vec<TransferRecord>,
    keys: HashSet<TransferKey>,
}

impl TransferSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless its key is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn insert(&mut self, record: TransferRecord) -> bool {
        if self.keys.insert(record.key()) {
            self.records.push(record);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn keys(&self) -> &HashSet<TransferKey> {
        &self.keys
    }

    /// Records in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &TransferRecord> {
        self.records.iter()
    }

    /// The first `limit` records in merge order.
    pub fn sample(&self, limit: usize) -> Vec<TransferRecord> {
        self.records.iter().take(limit).cloned().collect()
    }

    pub fn into_records(self) -> Vec<TransferRecord> {
        self.records
    }
}

impl Extend<TransferRecord> for TransferSet {
    fn extend<I: IntoIterator<Item = TransferRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<TransferRecord> for TransferSet {
    fn from_iter<I: IntoIterator<Item = TransferRecord>>(iter: I) -> Self {
        let mut set = TransferSet::new();
        set.extend(iter);
        set
    }
}

/// Merge outgoing and incoming transfers, outgoing first, first-seen wins.
pub fn merge(outgoing: Vec<TransferRecord>, incoming: Vec<TransferRecord>) -> TransferSet {
    let mut set = TransferSet::new();
    set.extend(outgoing);
    set.extend(incoming);
    set
}
