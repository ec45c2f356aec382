//! Record Store
//!
//! The in-memory collection bound to its backing file.
//!
//! ## Responsibilities
//! - Load the collection once on open
//! - Assign sequential ids
//! - Create/read/update/delete/search records in insertion order
//! - Rewrite the backing file after every mutation
//!
//! ## Failure Model
//! Nothing here is fatal. A missing or malformed file means an empty
//! collection. A failed save leaves the in-memory change in place and
//! returns the error; memory and disk then disagree until the next
//! successful save.

use std::fmt::Write;
use std::path::Path;

use chrono::Local;

use crate::config::{Config, DEFAULT_TIMESTAMP_FORMAT};
use crate::error::{Result, RollbookError};
use crate::record::{format_id, parse_suffix, Grade, StudentRecord, StudentUpdate};
use crate::stats::Statistics;
use crate::storage::JsonFile;

/// What `load()` found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No backing file yet; starting empty
    Missing,

    /// File parsed; number of records loaded
    Loaded(usize),

    /// File unreadable or malformed; starting empty
    Recovered(String),
}

/// Student records held in memory and mirrored to a JSON file
///
/// Single-threaded. Every mutation rewrites the whole file; a second
/// process writing the same file is not supported (last writer wins).
#[derive(Debug)]
pub struct RecordStore {
    config: Config,

    /// Backing file
    file: JsonFile,

    /// Records in insertion order
    students: Vec<StudentRecord>,
}

impl RecordStore {
    /// Open a store and load its backing file
    pub fn open(config: Config) -> Self {
        let file = JsonFile::new(&config.data_file);
        let mut store = Self {
            config,
            file,
            students: Vec::new(),
        };
        store.load();
        store
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: &Path) -> Self {
        Self::open(Config::builder().data_file(path).build())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Replace the in-memory collection with the backing file's contents
    pub fn load(&mut self) -> LoadOutcome {
        match self.file.read() {
            Ok(Some(students)) => {
                let count = students.len();
                self.students = students;
                tracing::info!(path = %self.file.path().display(), "Loaded {} student records", count);
                LoadOutcome::Loaded(count)
            }
            Ok(None) => {
                self.students.clear();
                tracing::info!(path = %self.file.path().display(), "No data file yet, starting empty");
                LoadOutcome::Missing
            }
            Err(e) => {
                self.students.clear();
                tracing::warn!(path = %self.file.path().display(), "Could not load data ({}), starting fresh", e);
                LoadOutcome::Recovered(e.to_string())
            }
        }
    }

    /// Write the full collection to the backing file
    pub fn save(&self) -> Result<()> {
        self.file.write(&self.students).map_err(|e| {
            tracing::error!(path = %self.file.path().display(), "Error saving data: {}", e);
            e
        })
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Next id: one past the highest well-formed suffix in the collection
    ///
    /// Records with malformed ids are skipped, as is a suffix of
    /// `u64::MAX`, which has no successor. `STU001` when nothing usable
    /// is present.
    pub fn generate_id(&self) -> String {
        let mut max_suffix: u64 = 0;
        for student in &self.students {
            match parse_suffix(&student.student_id) {
                Some(suffix) if suffix.checked_add(1).is_some() => {
                    max_suffix = max_suffix.max(suffix)
                }
                Some(_) => tracing::debug!(student_id = %student.student_id, "Skipping id with no successor"),
                None => tracing::debug!(student_id = %student.student_id, "Skipping malformed id"),
            }
        }
        format_id(max_suffix + 1)
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Append a new record and persist
    ///
    /// Returns the new id. If the save fails the record stays in memory
    /// and the error is returned.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        age: i64,
        grade: impl Into<Grade>,
        email: impl Into<String>,
        course: impl Into<String>,
    ) -> Result<String> {
        let student_id = self.generate_id();
        let record = StudentRecord::new(
            student_id.clone(),
            name,
            age,
            grade,
            email,
            course,
            self.now(),
        );

        self.students.push(record);
        self.save()?;

        tracing::info!("Student {} added successfully", student_id);
        Ok(student_id)
    }

    /// All records, or the one record with `student_id`
    ///
    /// An empty store and an unknown id both give an empty slice; they
    /// are logged differently.
    pub fn view(&self, student_id: Option<&str>) -> &[StudentRecord] {
        if self.students.is_empty() {
            tracing::warn!("No student records found");
            return &[];
        }

        let Some(student_id) = student_id else {
            return &self.students;
        };

        match self.position(student_id) {
            Some(index) => std::slice::from_ref(&self.students[index]),
            None => {
                tracing::warn!("Student with ID {} not found", student_id);
                &[]
            }
        }
    }

    /// First record with `student_id`
    pub fn get(&self, student_id: &str) -> Option<&StudentRecord> {
        self.students.iter().find(|s| s.student_id == student_id)
    }

    /// Apply `update` to the first record with `student_id` and persist
    ///
    /// `date_updated` is refreshed even for an empty update. An unknown
    /// id returns `StudentNotFound` and touches nothing.
    pub fn update(&mut self, student_id: &str, update: &StudentUpdate) -> Result<()> {
        let Some(index) = self.position(student_id) else {
            tracing::warn!("Student with ID {} not found", student_id);
            return Err(RollbookError::StudentNotFound(student_id.to_string()));
        };

        let now = self.now();
        self.students[index].apply(update, now);
        self.save()?;

        tracing::info!("Student {} updated successfully", student_id);
        Ok(())
    }

    /// Remove the first record with `student_id` and persist
    ///
    /// Returns:
    /// - `Ok(Some(record))`: removed and saved
    /// - `Ok(None)`: no such id; nothing written
    /// - `Err(_)`: removed from memory but the save failed
    pub fn delete(&mut self, student_id: &str) -> Result<Option<StudentRecord>> {
        let Some(index) = self.position(student_id) else {
            tracing::warn!("Student with ID {} not found", student_id);
            return Ok(None);
        };

        let removed = self.students.remove(index);
        self.save()?;

        tracing::info!("Student {} deleted successfully", student_id);
        Ok(Some(removed))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Records whose name, id or email contains `term`, ignoring case
    ///
    /// Course and grade are not searched. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&StudentRecord> {
        let needle = term.to_lowercase();
        self.students.iter().filter(|s| s.matches(&needle)).collect()
    }

    /// Total count and per-grade counts
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.students)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// All records in insertion order
    pub fn records(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn position(&self, student_id: &str) -> Option<usize> {
        self.students.iter().position(|s| s.student_id == student_id)
    }

    /// Current local time in the configured format
    ///
    /// A pattern chrono cannot render falls back to the default format.
    fn now(&self) -> String {
        let now = Local::now();
        let mut stamp = String::new();
        if write!(stamp, "{}", now.format(&self.config.timestamp_format)).is_ok() {
            return stamp;
        }

        tracing::warn!(
            format = %self.config.timestamp_format,
            "Invalid timestamp format, using {}",
            DEFAULT_TIMESTAMP_FORMAT
        );
        now.format(DEFAULT_TIMESTAMP_FORMAT).to_string()
    }
}
