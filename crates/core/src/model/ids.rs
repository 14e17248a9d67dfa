use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonIdError {
    #[error("lesson id cannot be empty")]
    Empty,

    #[error("lesson id contains invalid character {ch:?}")]
    InvalidChar { ch: char },
}

/// Unique key of a Lesson within a catalog (e.g. `intro`, `navigation`).
///
/// Ids are lowercase ascii letters, digits, `-` and `_`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonId(String);

impl LessonId {
    /// Creates a validated `LessonId`.
    ///
    /// # Errors
    ///
    /// Returns `LessonIdError::Empty` if the id is empty after trimming.
    /// Returns `LessonIdError::InvalidChar` for characters outside `[a-z0-9_-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, LessonIdError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LessonIdError::Empty);
        }
        if let Some(ch) = trimmed
            .chars()
            .find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-' || *ch == '_'))
        {
            return Err(LessonIdError::InvalidChar { ch });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LessonId {
    type Error = LessonIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LessonId> for String {
    fn from(id: LessonId) -> Self {
        id.0
    }
}

impl Borrow<str> for LessonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for LessonId {
    type Err = LessonIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonId({})", self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
