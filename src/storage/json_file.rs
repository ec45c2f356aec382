//! JSON backing file
//!
//! Full-file read and overwrite of the record collection.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Result;
use crate::record::StudentRecord;

/// Indentation used when writing the file
const INDENT: &[u8] = b"    ";

/// Handle on the file that stores the collection
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record
    ///
    /// Returns:
    /// - `Ok(None)`: the file does not exist
    /// - `Ok(Some(records))`: records in file order
    /// - `Err(_)`: unreadable file or malformed JSON
    pub fn read(&self) -> Result<Option<Vec<StudentRecord>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let records = serde_json::from_str(&content)?;
        Ok(Some(records))
    }

    /// Overwrite the file with `records`
    ///
    /// The document is encoded in memory first, so an encoding failure
    /// leaves the previous file untouched. The write itself is not atomic.
    pub fn write(&self, records: &[StudentRecord]) -> Result<()> {
        let buf = Self::encode(records)?;
        fs::write(&self.path, buf)?;
        Ok(())
    }

    /// Encode records the way they are stored on disk
    pub fn encode(records: &[StudentRecord]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        records.serialize(&mut ser)?;
        Ok(buf)
    }
}
