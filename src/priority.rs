//! Priority-ordered set used as the queue for tree construction.
//!
//! Entries stay sorted ascending by `(frequency, tie_break)`. The tie-break
//! id of a leaf is its symbol; a merged node carries the id of the first
//! entry popped for it. Every id in the set is therefore unique, and the
//! order depends on nothing but the frequency table.

use crate::tree::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub frequency: u64,
    pub tie_break: u8,
    pub node: NodeId,
}

impl Entry {
    fn key(&self) -> (u64, u8) {
        (self.frequency, self.tie_break)
    }
}

#[derive(Debug, Default)]
pub struct PriorityOrderedSet {
    entries: Vec<Entry>,
}

impl PriorityOrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert behind every entry whose key is not greater.
    pub fn insert(&mut self, entry: Entry) {
        let key = entry.key();
        let at = self.entries.partition_point(|e| e.key() <= key);
        self.entries.insert(at, entry);
    }

    /// Remove the two lowest entries, lowest first.
    ///
    /// Returns `None`, leaving the set untouched, when fewer than two remain.
    pub fn pop_two_lowest(&mut self) -> Option<(Entry, Entry)> {
        if self.entries.len() < 2 {
            return None;
        }
        let mut lowest = self.entries.drain(..2);
        let a = lowest.next()?;
        let b = lowest.next()?;
        Some((a, b))
    }

    pub fn pop_lowest(&mut self) -> Option<Entry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}
