//! Domain error types

use thiserror::Error;

/// Client-side validation failures, raised before any request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a file first")]
    NoFileSelected,

    #[error("Only CSV files are allowed")]
    NotCsv { file_name: String },

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Unknown group-by field: {0}")]
    UnknownGroupBy(String),

    #[error("Unknown sentiment: {0}")]
    UnknownSentiment(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

impl ValidationError {
    /// Check if this error concerns the upload file selection
    pub fn is_upload_error(&self) -> bool {
        matches!(
            self,
            ValidationError::NoFileSelected | ValidationError::NotCsv { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_messages() {
        assert_eq!(
            ValidationError::NoFileSelected.to_string(),
            "Please select a file first"
        );
        let err = ValidationError::NotCsv {
            file_name: "survey.xlsx".to_string(),
        };
        assert_eq!(err.to_string(), "Only CSV files are allowed");
    }

    #[test]
    fn test_is_upload_error() {
        assert!(ValidationError::NoFileSelected.is_upload_error());
        assert!(
            ValidationError::NotCsv {
                file_name: "a.txt".into()
            }
            .is_upload_error()
        );
        assert!(!ValidationError::UnknownQuestion("q9".into()).is_upload_error());
    }
}
