//! Sentiment label value object

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Derived sentiment of a survey response (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All sentiments in their fixed display order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Wire and display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(ValidationError::UnknownSentiment(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!("NEGATIVE".parse::<Sentiment>().unwrap(), Sentiment::Negative);
        assert_eq!(" Neutral ".parse::<Sentiment>().unwrap(), Sentiment::Neutral);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "mixed".parse::<Sentiment>(),
            Err(ValidationError::UnknownSentiment(_))
        ));
    }

    #[test]
    fn test_display_order() {
        let labels: Vec<_> = Sentiment::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["Positive", "Negative", "Neutral"]);
    }

    #[test]
    fn test_serde_uses_capitalized_label() {
        let json = serde_json::to_string(&Sentiment::Neutral).unwrap();
        assert_eq!(json, "\"Neutral\"");
    }
}
