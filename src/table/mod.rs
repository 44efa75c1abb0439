//! Location Table Module
//!
//! In-memory hash table of campus locations.
//!
//! ## Responsibilities
//! - Place every entry in the bucket chosen by [`KeyHasher`](crate::hasher::KeyHasher)
//! - Resolve collisions by chaining (newest entry at the head of its bucket)
//! - First-match search and delete
//! - Bucket-major iteration for listing and full rewrites
//!
//! ## Data Structure Choice
//! A fixed `Vec` of bucket chains, each chain a `VecDeque`:
//! - Prepend is O(1) (`push_front`)
//! - Entries are owned by their bucket, dropping a chain frees them
//! - Key uniqueness is NOT enforced here; callers check with `search` first

mod chain;
mod hash_table;

use serde::Serialize;

use crate::config::FieldLimits;

pub use chain::BucketChain;
pub use hash_table::{LocationTable, TableIter, TableStats};

/// A single campus location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocationEntry {
    /// Key used for lookups (e.g. "c_lab")
    pub key: String,
    pub building: String,
    pub floor: String,
    pub room: String,
    pub description: String,
}

impl LocationEntry {
    pub fn new(
        key: impl Into<String>,
        building: impl Into<String>,
        floor: impl Into<String>,
        room: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            building: building.into(),
            floor: floor.into(),
            room: room.into(),
            description: description.into(),
        }
    }

    /// Truncate every field to its limit, counted in characters
    pub fn bounded(self, limits: &FieldLimits) -> Self {
        Self {
            key: truncate_chars(self.key, limits.key),
            building: truncate_chars(self.building, limits.long),
            floor: truncate_chars(self.floor, limits.short),
            room: truncate_chars(self.room, limits.short),
            description: truncate_chars(self.description, limits.long),
        }
    }
}

fn truncate_chars(mut value: String, max: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max) {
        value.truncate(idx);
    }
    value
}
