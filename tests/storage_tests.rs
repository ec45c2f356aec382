//! Tests for JsonFile
//!
//! These tests verify:
//! - Missing file vs. malformed file reporting
//! - On-disk layout (array, 4-space indentation, key order)
//! - Write/read round trip

use std::fs;

use rollbook::storage::JsonFile;
use rollbook::{RollbookError, StudentRecord, StudentUpdate};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_records() -> Vec<StudentRecord> {
    let mut bob = StudentRecord::new("STU002", "Bob", 21, "B", "b@x.com", "Math", "2024-01-02 10:00:00");
    bob.apply(&StudentUpdate::new().course("Physics"), "2024-03-01 12:30:00".to_string());

    vec![
        StudentRecord::new("STU001", "Alice", 20, "A", "a@x.com", "CS", "2024-01-01 09:00:00"),
        bob,
        StudentRecord::new("STU003", "Zoë", 19, 88u32, "z@x.com", "Art", "2024-01-03 11:00:00"),
    ]
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = JsonFile::new(temp_dir.path().join("absent.json"));

    assert!(file.read().unwrap().is_none());
}

#[test]
fn test_read_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.json");
    fs::write(&path, "[{").unwrap();

    let err = JsonFile::new(&path).read().unwrap_err();
    assert!(matches!(err, RollbookError::Serialization(_)));
}

#[test]
fn test_read_empty_array() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("students.json");
    fs::write(&path, "[]").unwrap();

    assert_eq!(JsonFile::new(&path).read().unwrap(), Some(Vec::new()));
}

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let file = JsonFile::new(temp_dir.path().join("students.json"));
    let records = sample_records();

    file.write(&records).unwrap();

    assert_eq!(file.read().unwrap(), Some(records));
}

#[test]
fn test_write_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let file = JsonFile::new(temp_dir.path().join("students.json"));

    file.write(&sample_records()).unwrap();
    file.write(&[]).unwrap();

    assert_eq!(file.read().unwrap(), Some(Vec::new()));
}

#[test]
fn test_layout_uses_four_space_indent() {
    let records = vec![StudentRecord::new("STU001", "Alice", 20, "A", "a@x.com", "CS", "2024-01-01 09:00:00")];

    let encoded = String::from_utf8(JsonFile::encode(&records).unwrap()).unwrap();

    let expected = r#"[
    {
        "student_id": "STU001",
        "name": "Alice",
        "age": 20,
        "grade": "A",
        "email": "a@x.com",
        "course": "CS",
        "date_created": "2024-01-01 09:00:00"
    }
]"#;
    assert_eq!(encoded, expected);
}

#[test]
fn test_layout_keeps_utf8() {
    let encoded = String::from_utf8(JsonFile::encode(&sample_records()).unwrap()).unwrap();

    assert!(encoded.contains("\"Zoë\""));
    assert!(encoded.contains("\"grade\": 88"));
    assert!(encoded.contains("\"date_updated\": \"2024-03-01 12:30:00\""));
}

#[test]
fn test_write_to_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = JsonFile::new(temp_dir.path());

    let err = file.write(&sample_records()).unwrap_err();
    assert!(matches!(err, RollbookError::Io(_)));
}
