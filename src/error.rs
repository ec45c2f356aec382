//! Error types for Rollbook
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using RollbookError
pub type Result<T> = std::result::Result<T, RollbookError>;

/// Unified error type for Rollbook operations
#[derive(Debug, Error)]
pub enum RollbookError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Student with ID {0} not found")]
    StudentNotFound(String),

    // -------------------------------------------------------------------------
    // Update Errors
    // -------------------------------------------------------------------------
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },
}
