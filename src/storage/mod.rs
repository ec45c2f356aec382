//! Storage Module
//!
//! Persistence of the whole collection as one JSON document.
//!
//! ## Responsibilities
//! - Read the backing file once on startup (absent file = no records)
//! - Rewrite the backing file in full after each mutation
//!
//! ## File Format
//! A single JSON array of student objects, pretty-printed with 4-space
//! indentation, UTF-8. No versioning, no partial writes, no locking.

mod json_file;

pub use json_file::JsonFile;
