//! Location table implementation
//!
//! Fixed-size array of bucket chains.

use std::collections::vec_deque;
use std::iter::FlatMap;
use std::slice;

use crate::error::Result;
use crate::hasher::KeyHasher;

use super::{BucketChain, LocationEntry};

/// Chained hash table of locations
///
/// The bucket count is fixed at construction. Every entry lives in the
/// bucket `hasher.hash(entry.key)`.
#[derive(Debug, Clone)]
pub struct LocationTable {
    /// Maps keys to bucket indices
    hasher: KeyHasher,

    /// One chain per bucket, `buckets.len() == hasher.bucket_count()`
    buckets: Vec<BucketChain>,

    /// Total number of entries across all chains
    len: usize,
}

/// Occupancy snapshot of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Number of entries
    pub entries: usize,

    /// Number of buckets
    pub buckets: usize,

    /// Buckets holding at least one entry
    pub occupied_buckets: usize,

    /// Length of the longest chain
    pub longest_chain: usize,
}

impl LocationTable {
    /// Create an empty table with `bucket_count` buckets
    pub fn new(bucket_count: usize) -> Result<Self> {
        let hasher = KeyHasher::new(bucket_count)?;
        Ok(Self::with_hasher(hasher))
    }

    /// Create an empty table sized by an existing hasher
    pub fn with_hasher(hasher: KeyHasher) -> Self {
        let buckets = (0..hasher.bucket_count()).map(|_| BucketChain::new()).collect();
        Self {
            hasher,
            buckets,
            len: 0,
        }
    }

    /// Insert at the head of the entry's bucket
    ///
    /// Does not look for an existing entry with the same key: a duplicate
    /// is stored as well and shadows the older one on `search`.
    pub fn insert(&mut self, entry: LocationEntry) -> Result<()> {
        let index = self.hasher.hash(&entry.key);
        self.buckets[index].push_front(entry)?;
        self.len += 1;
        Ok(())
    }

    /// First entry with exactly this key, newest first within the bucket
    pub fn search(&self, key: &str) -> Option<&LocationEntry> {
        self.buckets[self.hasher.hash(key)].find(key)
    }

    /// Remove the first entry with this key
    ///
    /// Older duplicates, if any, stay in the table.
    pub fn delete(&mut self, key: &str) -> Option<LocationEntry> {
        let index = self.hasher.hash(key);
        let removed = self.buckets[index].remove_first(key)?;
        self.len -= 1;
        Some(removed)
    }

    /// Drop every entry; the bucket count is unchanged
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Entries in bucket order (0..N), head to tail within a bucket
    pub fn iter<'a>(&'a self) -> TableIter<'a> {
        let chain: fn(&'a BucketChain) -> ChainIter<'a> = BucketChain::iter;
        TableIter {
            inner: self.buckets.iter().flat_map(chain),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket that `key` hashes to
    pub fn bucket_of(&self, key: &str) -> usize {
        self.hasher.hash(key)
    }

    /// Number of entries in `bucket`, 0 if out of range
    pub fn chain_len(&self, bucket: usize) -> usize {
        self.buckets.get(bucket).map_or(0, BucketChain::len)
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            entries: self.len,
            buckets: self.buckets.len(),
            occupied_buckets: self.buckets.iter().filter(|b| !b.is_empty()).count(),
            longest_chain: self.buckets.iter().map(BucketChain::len).max().unwrap_or(0),
        }
    }
}

impl<'a> IntoIterator for &'a LocationTable {
    type Item = &'a LocationEntry;
    type IntoIter = TableIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

type ChainIter<'a> = vec_deque::Iter<'a, LocationEntry>;

/// Borrowing iterator over every entry of a [`LocationTable`]
pub struct TableIter<'a> {
    inner: FlatMap<
        slice::Iter<'a, BucketChain>,
        ChainIter<'a>,
        fn(&'a BucketChain) -> ChainIter<'a>,
    >,
}

impl<'a> Iterator for TableIter<'a> {
    type Item = &'a LocationEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
