//! Bucket chain
//!
//! Ordered list of entries that hashed to the same bucket.

use std::collections::vec_deque;
use std::collections::VecDeque;

use crate::error::{DirectoryError, Result};

use super::LocationEntry;

/// Entries of one bucket, head (most recently inserted) first
#[derive(Debug, Default, Clone)]
pub struct BucketChain {
    entries: VecDeque<LocationEntry>,
}

impl BucketChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `entry` at the head of the chain
    ///
    /// Storage is reserved before the chain is touched, so on
    /// `AllocationFailure` the chain is unchanged.
    pub fn push_front(&mut self, entry: LocationEntry) -> Result<()> {
        self.entries
            .try_reserve(1)
            .map_err(|_| DirectoryError::AllocationFailure)?;
        self.entries.push_front(entry);
        Ok(())
    }

    /// First entry (head to tail) whose key equals `key`
    pub fn find(&self, key: &str) -> Option<&LocationEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Unlink and return the first entry whose key equals `key`
    pub fn remove_first(&mut self, key: &str) -> Option<LocationEntry> {
        let position = self.entries.iter().position(|entry| entry.key == key)?;
        self.entries.remove(position)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries head to tail
    pub fn iter(&self) -> vec_deque::Iter<'_, LocationEntry> {
        self.entries.iter()
    }
}
