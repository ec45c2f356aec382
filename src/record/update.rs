//! Partial updates
//!
//! Only `name`, `age`, `grade`, `email` and `course` can be changed.
//! The id and both timestamps are owned by the store.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RollbookError};

use super::Grade;

/// Fields a caller may update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Name,
    Age,
    Grade,
    Email,
    Course,
}

impl UpdateField {
    /// Every updatable field, in record order
    pub const ALL: [UpdateField; 5] = [
        UpdateField::Name,
        UpdateField::Age,
        UpdateField::Grade,
        UpdateField::Email,
        UpdateField::Course,
    ];

    /// Key used for this field in the JSON file
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateField::Name => "name",
            UpdateField::Age => "age",
            UpdateField::Grade => "grade",
            UpdateField::Email => "email",
            UpdateField::Course => "course",
        }
    }
}

impl fmt::Display for UpdateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateField {
    type Err = RollbookError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        UpdateField::ALL
            .into_iter()
            .find(|field| field.as_str() == key)
            .ok_or_else(|| RollbookError::UnknownField(s.to_string()))
    }
}

/// A set of new values, one optional slot per updatable field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub grade: Option<Grade>,
    pub email: Option<String>,
    pub course: Option<String>,
}

impl StudentUpdate {
    /// Create an update that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an update from raw `(key, value)` pairs
    ///
    /// Keys that are not updatable fields are skipped. A value that does
    /// not parse for its field (e.g. a non-numeric age) is an error.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut update = Self::new();
        for (key, value) in pairs {
            match key.parse::<UpdateField>() {
                Ok(field) => update.set(field, value)?,
                Err(_) => tracing::debug!(key, "Ignoring unknown update field"),
            }
        }
        Ok(update)
    }

    /// Set one field from its raw string form
    pub fn set(&mut self, field: UpdateField, raw: &str) -> Result<()> {
        match field {
            UpdateField::Name => self.name = Some(raw.to_string()),
            UpdateField::Age => {
                let age = raw.trim().parse().map_err(|_| RollbookError::InvalidValue {
                    field: field.to_string(),
                    value: raw.to_string(),
                })?;
                self.age = Some(age);
            }
            UpdateField::Grade => self.grade = Some(Grade::from(raw)),
            UpdateField::Email => self.email = Some(raw.to_string()),
            UpdateField::Course => self.course = Some(raw.to_string()),
        }
        Ok(())
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn grade(mut self, grade: impl Into<Grade>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }

    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.grade.is_none()
            && self.email.is_none()
            && self.course.is_none()
    }
}
