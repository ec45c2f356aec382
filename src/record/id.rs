//! Student identifiers
//!
//! Ids look like `STU001`. The width is a minimum, so `STU1000` follows
//! `STU999`.

/// Prefix shared by every generated id
pub const ID_PREFIX: &str = "STU";

/// Minimum number of digits after the prefix
pub const ID_WIDTH: usize = 3;

/// Build an id from its numeric suffix
pub fn format_id(suffix: u64) -> String {
    format!("{}{:0width$}", ID_PREFIX, suffix, width = ID_WIDTH)
}

/// Parse the numeric suffix of an id
///
/// Returns `None` for anything that is not the prefix followed by digits.
pub fn parse_suffix(id: &str) -> Option<u64> {
    let digits = id.strip_prefix(ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
