//! Directory Module
//!
//! The directory service consumed by menu and CLI layers.
//!
//! ## Responsibilities
//! - Own the location table and its backing store
//! - Enforce task-key uniqueness before an add (the table does not)
//! - Keep memory and disk in step after every mutation
//! - Track the divergence window left by a failed rewrite

use std::path::Path;

use tracing::{error, info};

use crate::config::{Config, FieldLimits};
use crate::error::{DirectoryError, Result};
use crate::store::{LoadReport, LocationStore};
use crate::table::{LocationEntry, LocationTable, TableIter, TableStats};

/// Campus location directory
///
/// ## Persistence Contract
///
/// - **Add**: append to the file, then reload the table from it. On a write
///   failure nothing changes, in memory or on disk.
/// - **Delete**: remove from memory, then rewrite the whole file. On a write
///   failure the delete is NOT rolled back; the directory reports
///   `is_in_sync() == false` until the next successful `reload` or rewrite.
pub struct Directory {
    /// Directory configuration
    config: Config,

    /// In-memory locations
    table: LocationTable,

    /// Backing text file
    store: LocationStore,

    /// False while memory holds a delete the file does not reflect
    in_sync: bool,
}

impl Directory {
    /// Open a directory and load its data file
    ///
    /// A missing data file yields an empty directory, not an error.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let table = LocationTable::new(config.bucket_count)?;
        let store = LocationStore::new(&config.data_file, config.field_limits);

        let mut directory = Self {
            config,
            table,
            store,
            in_sync: true,
        };
        let report = directory.reload()?;

        info!(
            path = %directory.store.path().display(),
            locations = report.loaded,
            buckets = directory.table.bucket_count(),
            "location directory ready"
        );
        Ok(directory)
    }

    /// Open with a data file path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_file(path).build())
    }

    /// Discard memory and rebuild it from the data file
    pub fn reload(&mut self) -> Result<LoadReport> {
        let report = self.store.load_all(&mut self.table)?;
        self.in_sync = true;
        Ok(report)
    }

    /// Look up a location by task key (exact, case-sensitive)
    pub fn search_by_key(&self, key: &str) -> Option<&LocationEntry> {
        self.table.search(key)
    }

    /// All locations in bucket order
    pub fn list_all(&self) -> TableIter<'_> {
        self.table.iter()
    }

    /// Add a new location
    ///
    /// Inputs are trimmed and truncated to the configured limits before the
    /// uniqueness check, so the stored key is the one that gets checked.
    /// Fields containing a line break are refused. Returns the entry as
    /// stored.
    pub fn add_location(
        &mut self,
        key: &str,
        building: &str,
        floor: &str,
        room: &str,
        description: &str,
    ) -> Result<LocationEntry> {
        let entry = LocationEntry::new(
            key.trim(),
            building.trim(),
            floor.trim(),
            room.trim(),
            description.trim(),
        )
        .bounded(&self.config.field_limits);

        if entry.key.is_empty() {
            return Err(DirectoryError::EmptyKey);
        }
        for (name, value) in [
            ("key", &entry.key),
            ("building", &entry.building),
            ("floor", &entry.floor),
            ("room", &entry.room),
            ("description", &entry.description),
        ] {
            if value.contains(['\n', '\r']) {
                return Err(DirectoryError::InvalidField(name));
            }
        }
        if self.table.search(&entry.key).is_some() {
            return Err(DirectoryError::DuplicateKey(entry.key));
        }

        self.store.append_one(&mut self.table, &entry)?;
        self.in_sync = true;
        info!(key = %entry.key, "location added");
        Ok(entry)
    }

    /// Delete the first location with this task key and rewrite the file
    ///
    /// Returns the removed entry. On `FileWrite` the entry is already gone
    /// from memory (see the persistence contract above).
    pub fn delete_location(&mut self, key: &str) -> Result<LocationEntry> {
        let removed = self
            .table
            .delete(key)
            .ok_or_else(|| DirectoryError::KeyNotFound(key.to_string()))?;

        if let Err(e) = self.store.rewrite_all(&self.table) {
            self.in_sync = false;
            error!(key, error = %e, "location deleted in memory but not on disk");
            return Err(e);
        }

        self.in_sync = true;
        info!(key, "location deleted");
        Ok(removed)
    }

    /// Rewrite the data file from memory, closing any divergence window
    pub fn rewrite(&mut self) -> Result<usize> {
        let written = self.store.rewrite_all(&self.table)?;
        self.in_sync = true;
        Ok(written)
    }

    /// Whether the data file reflects the in-memory table
    pub fn is_in_sync(&self) -> bool {
        self.in_sync
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn stats(&self) -> TableStats {
        self.table.stats()
    }

    pub fn data_file(&self) -> &Path {
        self.store.path()
    }

    pub fn field_limits(&self) -> &FieldLimits {
        &self.config.field_limits
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
