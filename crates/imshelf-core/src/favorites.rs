//! In-memory favorites, keyed by record key
//!
//! Lifetime is the process: nothing is persisted, a reload starts empty.

use crate::domain::Record;

/// Insertion-ordered set of favorited records.
#[derive(Clone, Debug, Default)]
pub struct FavoritesSet {
    records: Vec<Record>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove `record`. Returns true when the record is a
    /// favorite after the call.
    pub fn toggle(&mut self, record: Record) -> bool {
        match self.records.iter().position(|r| r.key == record.key) {
            Some(index) => {
                self.records.remove(index);
                false
            }
            None => {
                self.records.push(record);
                true
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.iter().any(|r| r.key == key)
    }

    /// Favorited records in the order they were added.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
