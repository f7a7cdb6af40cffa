//! Survey record entity

use super::question::QuestionId;
use super::sentiment::Sentiment;
use serde::{Deserialize, Deserializer, Serialize};

/// One respondent's row as returned by the backend (Entity)
///
/// Every field except `id` may be missing or `null` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub id: i64,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub income: Option<String>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub q1_rating: Option<i64>,
    #[serde(default)]
    pub q2_rating: Option<i64>,
    #[serde(default)]
    pub q3_open: Option<String>,
    #[serde(default)]
    pub q4_rating: Option<i64>,
    #[serde(default)]
    pub q5_open: Option<String>,
    #[serde(default, deserialize_with = "lenient_sentiment")]
    pub sentiment_label: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_human: Option<bool>,
}

/// Decode a sentiment label, mapping unknown labels to `None`
fn lenient_sentiment<'de, D>(deserializer: D) -> Result<Option<Sentiment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

impl SurveyRecord {
    /// Create a record with only an id set
    pub fn new(id: i64) -> Self {
        Self {
            id,
            age: None,
            gender: None,
            zip_code: None,
            city: None,
            state: None,
            income: None,
            education_level: None,
            q1_rating: None,
            q2_rating: None,
            q3_open: None,
            q4_rating: None,
            q5_open: None,
            sentiment_label: None,
            is_human: None,
        }
    }

    /// Rating answer for a rating question (None for open-ended questions)
    pub fn rating(&self, question: QuestionId) -> Option<i64> {
        match question {
            QuestionId::Q1Rating => self.q1_rating,
            QuestionId::Q2Rating => self.q2_rating,
            QuestionId::Q4Rating => self.q4_rating,
            QuestionId::Q3Open | QuestionId::Q5Open => None,
        }
    }

    /// Text answer for an open-ended question (None for rating questions)
    pub fn open_answer(&self, question: QuestionId) -> Option<&str> {
        match question {
            QuestionId::Q3Open => self.q3_open.as_deref(),
            QuestionId::Q5Open => self.q5_open.as_deref(),
            _ => None,
        }
    }
}
