//! Survey question identifiers and group-by fields

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of answer a question collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Answered on a fixed numeric scale
    Rating,
    /// Answered with free text
    OpenEnded,
}

/// Survey question identifier (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    #[default]
    Q1Rating,
    Q2Rating,
    Q3Open,
    Q4Rating,
    Q5Open,
}

impl QuestionId {
    pub const ALL: [QuestionId; 5] = [
        QuestionId::Q1Rating,
        QuestionId::Q2Rating,
        QuestionId::Q3Open,
        QuestionId::Q4Rating,
        QuestionId::Q5Open,
    ];

    /// Identifier used in URLs and record fields
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionId::Q1Rating => "q1_rating",
            QuestionId::Q2Rating => "q2_rating",
            QuestionId::Q3Open => "q3_open",
            QuestionId::Q4Rating => "q4_rating",
            QuestionId::Q5Open => "q5_open",
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionId::Q1Rating | QuestionId::Q2Rating | QuestionId::Q4Rating => {
                QuestionKind::Rating
            }
            QuestionId::Q3Open | QuestionId::Q5Open => QuestionKind::OpenEnded,
        }
    }

    pub fn is_rating(&self) -> bool {
        self.kind() == QuestionKind::Rating
    }

    /// Human-readable question title
    pub fn title(&self) -> &'static str {
        match self {
            QuestionId::Q1Rating => "Q1: How much have you thought about AI impact?",
            QuestionId::Q2Rating => "Q2: Do you think AI will help with tasks?",
            QuestionId::Q3Open => "Q3: Open-ended response",
            QuestionId::Q4Rating => "Q4: How do you feel about AI in your field?",
            QuestionId::Q5Open => "Q5: Open-ended response",
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        QuestionId::ALL
            .into_iter()
            .find(|q| {
                q.as_str() == needle
                    // Short forms: "q1", "q3"
                    || q.as_str().split('_').next() == Some(needle.as_str())
            })
            .ok_or_else(|| ValidationError::UnknownQuestion(s.to_string()))
    }
}

/// Demographic field used to bucket aggregated results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Gender,
    EducationLevel,
    #[serde(rename = "sentiment_label")]
    Sentiment,
    Age,
}

impl GroupBy {
    pub const ALL: [GroupBy; 4] = [
        GroupBy::Gender,
        GroupBy::EducationLevel,
        GroupBy::Sentiment,
        GroupBy::Age,
    ];

    /// Query parameter value understood by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Gender => "gender",
            GroupBy::EducationLevel => "education_level",
            GroupBy::Sentiment => "sentiment_label",
            GroupBy::Age => "age",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::Gender => "By Gender",
            GroupBy::EducationLevel => "By Education Level",
            GroupBy::Sentiment => "By Sentiment",
            GroupBy::Age => "By Age",
        }
    }

    /// Parse an optional group-by, where `none`/`overall` clears grouping
    pub fn parse_optional(s: &str) -> Result<Option<Self>, ValidationError> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "overall" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gender" => Ok(GroupBy::Gender),
            "education_level" | "education" => Ok(GroupBy::EducationLevel),
            "sentiment_label" | "sentiment" => Ok(GroupBy::Sentiment),
            "age" => Ok(GroupBy::Age),
            _ => Err(ValidationError::UnknownGroupBy(s.to_string())),
        }
    }
}
