//! Record Module
//!
//! The student record data model.
//!
//! ## Responsibilities
//! - Fixed record shape with serde mapping onto the JSON file format
//! - Identifier format (`STU` + zero-padded number) and suffix parsing
//! - Partial updates over a closed set of field names

mod id;
mod student;
mod update;

pub use id::{format_id, parse_suffix, ID_PREFIX, ID_WIDTH};
pub use student::{Grade, StudentRecord};
pub use update::{StudentUpdate, UpdateField};
