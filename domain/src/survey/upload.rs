//! CSV upload selection

use crate::core::error::ValidationError;
use std::path::{Path, PathBuf};

/// A file the user picked for upload, validated as a CSV (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvUpload {
    path: PathBuf,
    file_name: String,
}

impl CsvUpload {
    /// Validate a selection before anything is read or sent
    pub fn select(path: Option<&Path>) -> Result<Self, ValidationError> {
        let path = path.ok_or(ValidationError::NoFileSelected)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .ok_or(ValidationError::NoFileSelected)?;

        if !file_name.ends_with(".csv") {
            return Err(ValidationError::NotCsv { file_name });
        }

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bare file name sent as the multipart filename
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_selected() {
        assert_eq!(
            CsvUpload::select(None),
            Err(ValidationError::NoFileSelected)
        );
    }

    #[test]
    fn test_rejects_non_csv() {
        let err = CsvUpload::select(Some(Path::new("data/survey.xlsx"))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotCsv {
                file_name: "survey.xlsx".to_string()
            }
        );
    }

    #[test]
    fn test_extension_check_is_on_suffix() {
        assert!(CsvUpload::select(Some(Path::new("survey.csv.bak"))).is_err());
        assert!(CsvUpload::select(Some(Path::new("csv"))).is_err());
    }

    #[test]
    fn test_accepts_csv() {
        let upload = CsvUpload::select(Some(Path::new("/tmp/responses.csv"))).unwrap();
        assert_eq!(upload.file_name(), "responses.csv");
        assert_eq!(upload.path(), Path::new("/tmp/responses.csv"));
    }
}
