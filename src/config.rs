//! Configuration for the campus directory
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{DirectoryError, Result};

/// Default number of hash buckets
pub const DEFAULT_BUCKET_COUNT: usize = 50;

/// Largest accepted bucket count; every bucket is allocated up front
pub const MAX_BUCKET_COUNT: usize = 1 << 16;

/// Default backing file name
pub const DEFAULT_DATA_FILE: &str = "university_data.txt";

/// Main configuration for a directory instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Flat text file holding one location per line
    pub data_file: PathBuf,

    // -------------------------------------------------------------------------
    // Table Configuration
    // -------------------------------------------------------------------------
    /// Number of buckets in the location table (fixed for its lifetime)
    pub bucket_count: usize,

    /// Maximum field lengths; longer values are truncated
    pub field_limits: FieldLimits,
}

/// Maximum lengths (in characters) of the text fields of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    /// Task key
    pub key: usize,

    /// Floor and room
    pub short: usize,

    /// Building and description
    pub long: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            key: 14,
            short: 14,
            long: 99,
        }
    }
}

impl FieldLimits {
    /// Limits that never truncate anything
    pub fn unbounded() -> Self {
        Self {
            key: usize::MAX,
            short: usize::MAX,
            long: usize::MAX,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            bucket_count: DEFAULT_BUCKET_COUNT,
            field_limits: FieldLimits::default(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration can back a directory
    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 || self.bucket_count > MAX_BUCKET_COUNT {
            return Err(DirectoryError::Config(format!(
                "bucket_count must be between 1 and {MAX_BUCKET_COUNT}, got {}",
                self.bucket_count
            )));
        }
        if self.field_limits.key == 0 {
            return Err(DirectoryError::Config(
                "key field limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing data file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the number of hash buckets
    pub fn bucket_count(mut self, count: usize) -> Self {
        self.config.bucket_count = count;
        self
    }

    /// Set the field length limits
    pub fn field_limits(mut self, limits: FieldLimits) -> Self {
        self.config.field_limits = limits;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
