//! Generation parameters supplied by the teacher.

use std::fmt;
use std::str::FromStr;

use circletime_core::error::StoryError;
use serde::{Deserialize, Serialize};

/// Learning level the story is pitched at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    /// Early Years, ages 3-4.
    #[default]
    #[serde(rename = "3-4")]
    EarlyYears,
    /// Pre-K / K3, ages 5-6.
    #[serde(rename = "5-6")]
    PreK,
}

impl AgeBracket {
    /// Every recognized bracket, youngest first.
    pub const ALL: [Self; 2] = [Self::EarlyYears, Self::PreK];

    /// The wire form, e.g. `"3-4"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EarlyYears => "3-4",
            Self::PreK => "5-6",
        }
    }

    /// Human-readable label for selection lists.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::EarlyYears => "Early Years (Ages 3-4)",
            Self::PreK => "Pre-K / K3 (Ages 5-6)",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeBracket {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bracket| bracket.as_str() == s.trim())
            .ok_or_else(|| StoryError::Validation(format!("unrecognized age bracket: {s:?}")))
    }
}

/// Parameters for one story generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// The child the story is written for.
    pub student_name: String,
    /// Learning level.
    #[serde(alias = "ageGroup", default)]
    pub age_bracket: AgeBracket,
    /// What the story is about.
    pub topic: String,
}

impl GenerationRequest {
    /// Creates a request from already-typed parts.
    #[must_use]
    pub fn new(
        student_name: impl Into<String>,
        age_bracket: AgeBracket,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            age_bracket,
            topic: topic.into(),
        }
    }

    /// Creates a request from raw form values, rejecting unknown brackets.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Validation` if `age_bracket` is not recognized.
    pub fn parse(student_name: &str, age_bracket: &str, topic: &str) -> Result<Self, StoryError> {
        Ok(Self::new(student_name, age_bracket.parse()?, topic))
    }

    /// Checks that name and topic carry visible text.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Validation` naming the first empty field.
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.student_name.trim().is_empty() {
            return Err(StoryError::Validation(
                "student name must not be empty".into(),
            ));
        }
        if self.topic.trim().is_empty() {
            return Err(StoryError::Validation("topic must not be empty".into()));
        }
        Ok(())
    }

    /// Returns a copy with surrounding whitespace removed from text fields.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::new(self.student_name.trim(), self.age_bracket, self.topic.trim())
    }
}
