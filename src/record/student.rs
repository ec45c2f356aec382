//! Student record
//!
//! Field order here is the key order written to the backing file.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::StudentUpdate;

/// A grade label
///
/// Files written by hand may carry numeric grades (`90`, `3.5`) or an
/// explicit `null` next to text labels (`"A"`), so all three are accepted
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    /// Text label, e.g. `"A"` or `"B+"`
    Label(String),

    /// Numeric score
    Score(serde_json::Number),

    /// `"grade": null` in the file. The key exists, so updates still apply.
    Null,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Label(label) => f.write_str(label),
            Grade::Score(score) => write!(f, "{}", score),
            Grade::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Grade {
    fn from(label: &str) -> Self {
        Grade::Label(label.to_string())
    }
}

impl From<String> for Grade {
    fn from(label: String) -> Self {
        Grade::Label(label)
    }
}

impl From<u32> for Grade {
    fn from(score: u32) -> Self {
        Grade::Score(score.into())
    }
}

/// One student's stored attributes plus lifecycle timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique, immutable once assigned. A record missing the key loads
    /// with an empty id, which id generation treats as malformed.
    #[serde(default)]
    pub student_id: String,

    pub name: String,

    pub age: i64,

    /// `None` only when the key is missing; a stored `null` is `Grade::Null`
    #[serde(
        default,
        deserialize_with = "deserialize_present_grade",
        skip_serializing_if = "Option::is_none"
    )]
    pub grade: Option<Grade>,

    pub email: String,

    pub course: String,

    /// Set once at creation
    pub date_created: String,

    /// Absent until the first update, then refreshed on every update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<String>,
}

impl StudentRecord {
    /// Create a record that has never been updated
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        age: i64,
        grade: impl Into<Grade>,
        email: impl Into<String>,
        course: impl Into<String>,
        date_created: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            age,
            grade: Some(grade.into()),
            email: email.into(),
            course: course.into(),
            date_created: date_created.into(),
            date_updated: None,
        }
    }

    /// Overwrite the supplied fields and stamp `date_updated`
    ///
    /// A grade is only overwritten when the record already carries one;
    /// fields the record does not have are left alone. `date_updated` is
    /// stamped even when nothing else changed.
    pub fn apply(&mut self, update: &StudentUpdate, now: String) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(grade) = &update.grade {
            if self.grade.is_some() {
                self.grade = Some(grade.clone());
            } else {
                tracing::debug!(student_id = %self.student_id, "Record has no grade, ignoring grade update");
            }
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(course) = &update.course {
            self.course = course.clone();
        }

        self.date_updated = Some(now);
    }

    /// Case-insensitive substring match on name, id and email
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.student_id.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

/// Called only when the `grade` key is present, so `null` maps to
/// `Some(Grade::Null)` rather than `None`
fn deserialize_present_grade<'de, D>(deserializer: D) -> Result<Option<Grade>, D::Error>
where
    D: Deserializer<'de>,
{
    Grade::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> StudentRecord {
        StudentRecord::new("STU001", "Alice", 20, "A", "a@x.com", "CS", "2024-01-01 09:00:00")
    }

    #[test]
    fn test_serialized_key_order() {
        let json = serde_json::to_string(&alice()).unwrap();
        assert_eq!(
            json,
            r#"{"student_id":"STU001","name":"Alice","age":20,"grade":"A","email":"a@x.com","course":"CS","date_created":"2024-01-01 09:00:00"}"#
        );
    }

    #[test]
    fn test_date_updated_written_once_set() {
        let mut record = alice();
        record.apply(&StudentUpdate::new(), "2024-02-02 10:00:00".to_string());

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.ends_with(r#""date_updated":"2024-02-02 10:00:00"}"#));
    }

    #[test]
    fn test_numeric_grade() {
        let json = r#"{"student_id":"STU007","name":"Eve","age":19,"grade":90,
            "email":"e@x.com","course":"Art","date_created":"2024-01-01 09:00:00"}"#;
        let record: StudentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.grade, Some(Grade::from(90u32)));
        assert_eq!(record.grade.unwrap().to_string(), "90");
    }

    #[test]
    fn test_missing_id_and_grade() {
        let json = r#"{"name":"Nobody","age":30,"email":"n@x.com",
            "course":"History","date_created":"2024-01-01 09:00:00"}"#;
        let record: StudentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.student_id, "");
        assert_eq!(record.grade, None);
        assert_eq!(record.date_updated, None);
    }

    #[test]
    fn test_null_grade_keeps_key() {
        let json = r#"{"student_id":"STU008","name":"Ned","age":19,"grade":null,
            "email":"n@x.com","course":"Art","date_created":"2024-01-01 09:00:00"}"#;
        let mut record: StudentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.grade, Some(Grade::Null));
        assert!(serde_json::to_string(&record).unwrap().contains(r#""grade":null"#));

        record.apply(&StudentUpdate::new().grade("B"), "2024-02-02 10:00:00".to_string());
        assert_eq!(record.grade, Some(Grade::from("B")));
    }

    #[test]
    fn test_negative_and_large_age() {
        let json = r#"[
            {"student_id":"STU001","name":"A","age":-1,"email":"a","course":"c","date_created":"t"},
            {"student_id":"STU002","name":"B","age":5000000000,"email":"b","course":"c","date_created":"t"}
        ]"#;
        let records: Vec<StudentRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records[0].age, -1);
        assert_eq!(records[1].age, 5_000_000_000);
    }

    #[test]
    fn test_apply_overwrites_supplied_fields() {
        let mut record = alice();
        let update = StudentUpdate::new().age(21).course("Math");
        record.apply(&update, "2024-02-02 10:00:00".to_string());

        assert_eq!(record.age, 21);
        assert_eq!(record.course, "Math");
        assert_eq!(record.name, "Alice");
        assert_eq!(record.date_created, "2024-01-01 09:00:00");
        assert_eq!(record.date_updated.as_deref(), Some("2024-02-02 10:00:00"));
    }

    #[test]
    fn test_apply_skips_grade_when_absent() {
        let mut record = alice();
        record.grade = None;
        record.apply(&StudentUpdate::new().grade("B"), "2024-02-02 10:00:00".to_string());

        assert_eq!(record.grade, None);
        assert!(record.date_updated.is_some());
    }

    #[test]
    fn test_matches_fields() {
        let record = alice();
        assert!(record.matches("ali"));
        assert!(record.matches("stu001"));
        assert!(record.matches("@x.com"));
        assert!(record.matches(""));
        assert!(!record.matches("cs"));
    }
}
