//! # Rollbook
//!
//! A single-file student record store:
//! - Sequential ids (`STU001`, `STU002`, ...)
//! - Create/read/update/delete with insertion order preserved
//! - Case-insensitive search and per-grade statistics
//! - Whole-collection JSON persistence after every mutation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CLI (rollbook binary)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      RecordStore                             │
//! │         (Vec<StudentRecord>, insertion ordered)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ load once / rewrite on mutation
//!                       ▼
//!                ┌─────────────┐
//!                │  JsonFile   │
//!                │ (students.  │
//!                │   json)     │
//!                └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use rollbook::{Config, RecordStore, StudentUpdate};
//!
//! let mut store = RecordStore::open(Config::builder().data_file("students.json").build());
//! let id = store.add("Alice", 20, "A", "alice@example.com", "CS")?;
//! store.update(&id, &StudentUpdate::new().course("Math"))?;
//! println!("{:?}", store.statistics());
//! # Ok::<(), rollbook::RollbookError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod stats;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RollbookError, Result};
pub use config::Config;
pub use record::{Grade, StudentRecord, StudentUpdate, UpdateField};
pub use stats::Statistics;
pub use store::{LoadOutcome, RecordStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Rollbook
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
