//! # Campus Directory
//!
//! A campus location guide backed by a flat text file:
//! - Chained hash table keyed by short task keys ("c_lab", "library")
//! - Deterministic rolling hash over a fixed bucket count
//! - Append-and-reload on add, full rewrite on delete
//! - Single-threaded, one owned directory instance per process
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Menu / CLI (campus-dir)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Directory                               │
//! │        (uniqueness check, memory/disk contract)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌───────────────┐        ┌───────────────┐
//!   │ LocationTable │◄───────│ LocationStore │
//!   │   (buckets)   │ reload │  (text file)  │
//!   └───────┬───────┘        └───────────────┘
//!           │
//!           ▼
//!   ┌───────────────┐
//!   │   KeyHasher   │
//!   └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod hasher;
pub mod table;
pub mod store;
pub mod directory;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DirectoryError, Result};
pub use config::{Config, FieldLimits};
pub use directory::Directory;
pub use table::{LocationEntry, LocationTable};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
