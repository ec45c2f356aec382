//! Collection statistics

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::StudentRecord;

/// Bucket for records that carry no grade
pub const MISSING_GRADE: &str = "N/A";

/// Aggregate counts over the collection
///
/// An empty collection has no `by_grade` at all, so it serializes as
/// `{"total_students": 0}`.
///
/// Buckets are keyed by the grade's display text, since JSON object keys
/// are strings: the score `90` and the label `"90"` share the `"90"`
/// bucket, and a stored `null` grade counts under `"null"`. Only a record
/// with no `grade` key counts under `"N/A"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_students: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_grade: Option<BTreeMap<String, usize>>,
}

impl Statistics {
    /// Compute statistics for `records`
    pub fn compute(records: &[StudentRecord]) -> Self {
        if records.is_empty() {
            return Self {
                total_students: 0,
                by_grade: None,
            };
        }

        let mut by_grade = BTreeMap::new();
        for record in records {
            let key = match &record.grade {
                Some(grade) => grade.to_string(),
                None => MISSING_GRADE.to_string(),
            };
            *by_grade.entry(key).or_insert(0) += 1;
        }

        Self {
            total_students: records.len(),
            by_grade: Some(by_grade),
        }
    }
}
