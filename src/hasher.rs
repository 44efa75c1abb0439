//! Key hashing
//!
//! Maps a task key to a bucket index with a polynomial rolling hash.
//! The accumulator is reduced modulo the bucket count after every byte,
//! so it never exceeds `31 * N + 255` and the result is identical across
//! runs and processes. N is capped at `MAX_BUCKET_COUNT`.

use crate::config::MAX_BUCKET_COUNT;
use crate::error::{DirectoryError, Result};

/// Multiplier of the rolling hash
const MULTIPLIER: usize = 31;

/// Deterministic string → bucket index function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHasher {
    bucket_count: usize,
}

impl KeyHasher {
    /// Create a hasher for a table with `bucket_count` buckets
    ///
    /// `bucket_count` must be in `1..=MAX_BUCKET_COUNT`.
    pub fn new(bucket_count: usize) -> Result<Self> {
        if bucket_count == 0 || bucket_count > MAX_BUCKET_COUNT {
            return Err(DirectoryError::Config(format!(
                "bucket_count must be between 1 and {MAX_BUCKET_COUNT}, got {bucket_count}"
            )));
        }
        Ok(Self { bucket_count })
    }

    /// Bucket index for `key`, always in `[0, bucket_count)`
    ///
    /// The empty key hashes to 0.
    pub fn hash(&self, key: &str) -> usize {
        key.bytes().fold(0usize, |h, byte| {
            (h * MULTIPLIER + usize::from(byte)) % self.bucket_count
        })
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }
}
