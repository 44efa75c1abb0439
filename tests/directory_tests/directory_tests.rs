//! Tests for Directory
//!
//! These tests verify:
//! - Open / reload lifecycle, including a missing data file
//! - search_by_key / list_all
//! - add_location uniqueness, trimming and truncation
//! - delete_location and the rewritten file
//! - Memory/disk divergence after a failed rewrite (no rollback)

use std::fs;
use std::path::{Path, PathBuf};

use campus_directory::config::{Config, FieldLimits, MAX_BUCKET_COUNT};
use campus_directory::store::HEADER_LINES;
use campus_directory::{Directory, DirectoryError, LocationEntry};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn data_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("university_data.txt")
}

fn setup_temp_directory() -> (TempDir, Directory) {
    let temp_dir = TempDir::new().unwrap();
    let directory = Directory::open_path(&data_path(&temp_dir)).unwrap();
    (temp_dir, directory)
}

fn setup_seeded_directory(contents: &str) -> (TempDir, Directory) {
    let temp_dir = TempDir::new().unwrap();
    fs::write(data_path(&temp_dir), contents).unwrap();
    let directory = Directory::open_path(&data_path(&temp_dir)).unwrap();
    (temp_dir, directory)
}

fn entry_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

const SEED: &str = "\
# Location Data File
# Format: key;building;floor;room;description
library;Main Library;Ground;G01;Central library
c_lab;Engineering Hall;2nd;204;Computer Lab
admin_office;Admin Block;1st;A12;Registrar and admissions
";

// =============================================================================
// Open / Reload Tests
// =============================================================================

#[test]
fn test_open_missing_file_is_empty() {
    let (temp, directory) = setup_temp_directory();

    assert!(directory.is_empty());
    assert!(directory.is_in_sync());
    assert!(!data_path(&temp).exists());
    assert_eq!(directory.data_file(), data_path(&temp).as_path());
}

#[test]
fn test_open_loads_seed_file() {
    let (_temp, directory) = setup_seeded_directory(SEED);

    assert_eq!(directory.len(), 3);
    assert_eq!(directory.config().bucket_count, 50);
    assert_eq!(directory.field_limits(), &FieldLimits::default());
}

#[test]
fn test_open_rejects_zero_buckets() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_file(data_path(&temp_dir))
        .bucket_count(0)
        .build();

    let result = Directory::open(config);

    assert!(matches!(result, Err(DirectoryError::Config(_))));
}

#[test]
fn test_open_rejects_oversized_bucket_count() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_file(data_path(&temp_dir))
        .bucket_count(MAX_BUCKET_COUNT + 1)
        .build();

    let result = Directory::open(config);

    assert!(matches!(result, Err(DirectoryError::Config(_))));
}

#[test]
fn test_open_accepts_max_bucket_count() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_file(data_path(&temp_dir))
        .bucket_count(MAX_BUCKET_COUNT)
        .build();

    let directory = Directory::open(config).unwrap();

    assert_eq!(directory.stats().buckets, MAX_BUCKET_COUNT);
}

#[test]
fn test_open_unreadable_data_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_path(&temp_dir);
    fs::create_dir(&path).unwrap();

    let mut directory = Directory::open_path(&path).unwrap();

    assert!(directory.is_empty());
    assert!(directory.is_in_sync());
    assert!(directory.reload().unwrap().read_failed);
}

#[test]
fn test_reload_picks_up_file_changes() {
    let (temp, mut directory) = setup_seeded_directory(SEED);

    fs::write(data_path(&temp), "gym;Sports Complex;Ground;SC1;Gymnasium\n").unwrap();
    let report = directory.reload().unwrap();

    assert_eq!(report.loaded, 1);
    assert_eq!(directory.len(), 1);
    assert!(directory.search_by_key("gym").is_some());
    assert!(directory.search_by_key("library").is_none());
}

// =============================================================================
// Search / List Tests
// =============================================================================

#[test]
fn test_search_by_key_returns_exact_fields() {
    let (_temp, directory) = setup_seeded_directory(SEED);

    let entry = directory.search_by_key("c_lab").unwrap();

    assert_eq!(
        entry,
        &LocationEntry::new("c_lab", "Engineering Hall", "2nd", "204", "Computer Lab")
    );
}

#[test]
fn test_search_by_key_not_found() {
    let (_temp, directory) = setup_seeded_directory(SEED);
    assert!(directory.search_by_key("pool").is_none());
}

#[test]
fn test_list_all_bucket_order() {
    let (_temp, directory) = setup_seeded_directory(SEED);

    // library -> 7, admin_office -> 16, c_lab -> 17
    let keys: Vec<&str> = directory.list_all().map(|e| e.key.as_str()).collect();

    assert_eq!(keys, vec!["library", "admin_office", "c_lab"]);
}

// =============================================================================
// Add Tests
// =============================================================================

#[test]
fn test_add_then_search() {
    let (temp, mut directory) = setup_temp_directory();

    directory
        .add_location("c_lab", "Engineering Hall", "2nd", "204", "Computer Lab")
        .unwrap();

    let entry = directory.search_by_key("c_lab").unwrap();
    assert_eq!(entry.building, "Engineering Hall");
    assert_eq!(entry.floor, "2nd");
    assert_eq!(entry.room, "204");
    assert_eq!(entry.description, "Computer Lab");
    assert_eq!(
        entry_lines(&data_path(&temp)),
        vec!["c_lab;Engineering Hall;2nd;204;Computer Lab"]
    );
    assert!(directory.is_in_sync());
}

#[test]
fn test_add_duplicate_key_rejected() {
    let (temp, mut directory) = setup_seeded_directory(SEED);
    let before = fs::read_to_string(data_path(&temp)).unwrap();

    let result = directory.add_location("c_lab", "Other Hall", "1st", "101", "Another lab");

    assert!(matches!(result, Err(DirectoryError::DuplicateKey(ref key)) if key == "c_lab"));
    assert_eq!(directory.len(), 3);
    assert_eq!(directory.search_by_key("c_lab").unwrap().building, "Engineering Hall");
    assert_eq!(fs::read_to_string(data_path(&temp)).unwrap(), before);
}

#[test]
fn test_add_empty_key_rejected() {
    let (temp, mut directory) = setup_temp_directory();

    let result = directory.add_location("   ", "Hall", "1st", "101", "Nothing");

    assert!(matches!(result, Err(DirectoryError::EmptyKey)));
    assert!(!data_path(&temp).exists());
}

#[test]
fn test_add_rejects_line_breaks_in_fields() {
    let (temp, mut directory) = setup_temp_directory();
    directory
        .add_location("gym", "Sports Complex", "Ground", "SC1", "Gymnasium")
        .unwrap();
    let before = fs::read_to_string(data_path(&temp)).unwrap();

    let smuggled = directory.add_location("lab", "Hall", "1st", "L1", "Lab\ngym;Other;9;9;Second gym");
    let carriage = directory.add_location("lab", "Hall\rAnnex", "1st", "L1", "Lab");
    let in_key = directory.add_location("la\nb", "Hall", "1st", "L1", "Lab");

    assert!(matches!(smuggled, Err(DirectoryError::InvalidField("description"))));
    assert!(matches!(carriage, Err(DirectoryError::InvalidField("building"))));
    assert!(matches!(in_key, Err(DirectoryError::InvalidField("key"))));
    assert_eq!(fs::read_to_string(data_path(&temp)).unwrap(), before);
    assert_eq!(directory.len(), 1);
    assert_eq!(directory.search_by_key("gym").unwrap().building, "Sports Complex");
    assert!(directory.search_by_key("lab").is_none());
}

#[test]
fn test_add_returns_stored_entry() {
    let (_temp, mut directory) = setup_temp_directory();

    let added = directory
        .add_location(" engineering_lab_one ", "Hall", "1st", "101", "First")
        .unwrap();

    assert_eq!(added.key, "engineering_la");
    assert_eq!(directory.search_by_key(&added.key), Some(&added));
}

#[test]
fn test_add_trims_inputs() {
    let (_temp, mut directory) = setup_temp_directory();

    directory
        .add_location("  gym ", " Sports Complex ", " Ground", "SC1 ", " Gymnasium ")
        .unwrap();

    assert_eq!(
        directory.search_by_key("gym"),
        Some(&LocationEntry::new("gym", "Sports Complex", "Ground", "SC1", "Gymnasium"))
    );
    assert!(matches!(
        directory.add_location("gym ", "x", "x", "x", "x"),
        Err(DirectoryError::DuplicateKey(_))
    ));
}

#[test]
fn test_add_truncates_long_key_before_uniqueness_check() {
    let (_temp, mut directory) = setup_temp_directory();

    directory
        .add_location("engineering_lab_one", "Hall", "1st", "101", "First")
        .unwrap();

    assert!(directory.search_by_key("engineering_la").is_some());
    let result = directory.add_location("engineering_lab_two", "Hall", "1st", "102", "Second");
    assert!(matches!(result, Err(DirectoryError::DuplicateKey(ref key)) if key == "engineering_la"));
}

#[test]
fn test_add_write_failure_changes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_path(&temp_dir);
    let mut directory = Directory::open_path(&path).unwrap();
    // A directory in place of the data file cannot be appended to
    fs::create_dir(&path).unwrap();

    let result = directory.add_location("c_lab", "Engineering Hall", "2nd", "204", "Computer Lab");

    assert!(matches!(result, Err(DirectoryError::FileWrite { .. })));
    assert!(directory.search_by_key("c_lab").is_none());
    assert!(directory.is_empty());
    assert!(directory.is_in_sync());
}

#[test]
fn test_add_round_trip_through_reload() {
    let (_temp, mut directory) = setup_temp_directory();
    let mut added = vec![
        LocationEntry::new("c_lab", "Engineering Hall", "2nd", "204", "Computer Lab"),
        LocationEntry::new("library", "Main Library", "Ground", "G01", "Central library"),
        LocationEntry::new("aab", "North Wing", "1st", "N1", "Shares a bucket"),
        LocationEntry::new("b_c", "South Wing", "2nd", "S2", "Shares a bucket"),
        LocationEntry::new("cafe", "Student Center", "Ground", "SC-3", "Coffee and snacks"),
    ];
    for e in &added {
        directory
            .add_location(&e.key, &e.building, &e.floor, &e.room, &e.description)
            .unwrap();
    }

    directory.reload().unwrap();

    let mut recovered: Vec<LocationEntry> = directory.list_all().cloned().collect();
    recovered.sort_by(|a, b| a.key.cmp(&b.key));
    added.sort_by(|a, b| a.key.cmp(&b.key));
    assert_eq!(recovered, added);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_then_search_not_found() {
    let (temp, mut directory) = setup_seeded_directory(SEED);

    let removed = directory.delete_location("c_lab").unwrap();

    assert_eq!(removed.key, "c_lab");
    assert!(directory.search_by_key("c_lab").is_none());
    assert_eq!(directory.len(), 2);
    assert!(entry_lines(&data_path(&temp))
        .iter()
        .all(|line| !line.starts_with("c_lab;")));
    assert!(directory.is_in_sync());
}

#[test]
fn test_delete_missing_key() {
    let (temp, mut directory) = setup_seeded_directory(SEED);
    let before = fs::read_to_string(data_path(&temp)).unwrap();

    let result = directory.delete_location("pool");

    assert!(matches!(result, Err(DirectoryError::KeyNotFound(ref key)) if key == "pool"));
    assert_eq!(directory.len(), 3);
    assert_eq!(fs::read_to_string(data_path(&temp)).unwrap(), before);
}

#[test]
fn test_delete_rewrites_remaining_entries() {
    let (temp, mut directory) = setup_seeded_directory(SEED);

    directory.delete_location("library").unwrap();

    let contents = fs::read_to_string(data_path(&temp)).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            HEADER_LINES[0],
            HEADER_LINES[1],
            "admin_office;Admin Block;1st;A12;Registrar and admissions",
            "c_lab;Engineering Hall;2nd;204;Computer Lab",
        ]
    );
}

#[test]
fn test_delete_exposes_shadowed_duplicate() {
    let (temp, mut directory) = setup_seeded_directory("gym;Old Gym;1st;G1;Old\ngym;New Gym;2nd;G2;New\n");

    directory.delete_location("gym").unwrap();

    assert_eq!(directory.search_by_key("gym").unwrap().building, "Old Gym");
    assert_eq!(entry_lines(&data_path(&temp)), vec!["gym;Old Gym;1st;G1;Old"]);
}

#[test]
fn test_delete_failed_rewrite_keeps_memory_delete() {
    let (temp, mut directory) = setup_seeded_directory(SEED);
    let path = data_path(&temp);
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let result = directory.delete_location("c_lab");

    // No rollback: the entry is gone from memory even though the write failed
    assert!(matches!(result, Err(DirectoryError::FileWrite { .. })));
    assert!(directory.search_by_key("c_lab").is_none());
    assert_eq!(directory.len(), 2);
    assert!(!directory.is_in_sync());

    // Restoring the file and reloading closes the divergence window
    fs::remove_dir(&path).unwrap();
    fs::write(&path, SEED).unwrap();
    directory.reload().unwrap();

    assert!(directory.is_in_sync());
    assert!(directory.search_by_key("c_lab").is_some());
}

#[test]
fn test_rewrite_after_failed_delete_persists_it() {
    let (temp, mut directory) = setup_seeded_directory(SEED);
    let path = data_path(&temp);
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();
    assert!(directory.delete_location("c_lab").is_err());

    fs::remove_dir(&path).unwrap();
    let written = directory.rewrite().unwrap();

    assert_eq!(written, 2);
    assert!(directory.is_in_sync());
    assert!(entry_lines(&path).iter().all(|line| !line.starts_with("c_lab;")));
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

#[test]
fn test_add_delete_scenario_leaves_header_only() {
    let (temp, mut directory) = setup_temp_directory();

    directory
        .add_location("c_lab", "Engineering Hall", "2nd", "204", "Computer Lab")
        .unwrap();
    assert_eq!(
        directory.search_by_key("c_lab"),
        Some(&LocationEntry::new("c_lab", "Engineering Hall", "2nd", "204", "Computer Lab"))
    );

    directory.delete_location("c_lab").unwrap();
    assert!(directory.search_by_key("c_lab").is_none());

    let contents = fs::read_to_string(data_path(&temp)).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, HEADER_LINES.to_vec());
}

#[test]
fn test_custom_bucket_count() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_file(data_path(&temp_dir))
        .bucket_count(1)
        .build();
    let mut directory = Directory::open(config).unwrap();

    for key in ["first", "second", "third"] {
        directory.add_location(key, "Hall", "1st", "101", "Room").unwrap();
    }

    let stats = directory.stats();
    assert_eq!(stats.buckets, 1);
    assert_eq!(stats.longest_chain, 3);
    // File order is insertion order, the single chain is newest first
    let keys: Vec<&str> = directory.list_all().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["third", "second", "first"]);
}
