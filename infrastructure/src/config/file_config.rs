//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use serde::{Deserialize, Serialize};
use survey_domain::OutputFormat;
use survey_domain::table::query::DEFAULT_PAGE_SIZE;
use thiserror::Error;

// Re-export OutputFormat from domain for convenience
pub use survey_domain::OutputFormat as FileOutputFormat;

/// Backend URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("api.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("api.base_url must start with http:// or https:// (got {0})")]
    UnsupportedScheme(String),

    #[error("api.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("table.page_size cannot be 0")]
    InvalidPageSize,
}

/// Raw backend configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Base URL of the survey backend
    pub base_url: String,
    /// Timeout in seconds for backend calls
    pub timeout_seconds: Option<u64>,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Raw table configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTableConfig {
    /// Rows per page
    pub page_size: usize,
}

impl Default for FileTableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write logs to this file instead of stderr
    pub file: Option<String>,
}

/// Raw interactive session configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Where line history is kept; defaults to the user's data directory
    pub history_file: Option<String>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api: FileApiConfig,
    pub output: FileOutputConfig,
    pub table: FileTableConfig,
    pub logging: FileLoggingConfig,
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigValidationError::UnsupportedScheme(
                base_url.to_string(),
            ));
        }

        if let Some(0) = self.api.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.table.page_size == 0 {
            return Err(ConfigValidationError::InvalidPageSize);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
base_url = "https://surveys.example.com"
timeout_seconds = 5

[output]
format = "json"
color = false

[table]
page_size = 25

[logging]
file = "/tmp/survey-dashboard.log"

[repl]
history_file = "/tmp/survey-history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://surveys.example.com");
        assert_eq!(config.api.timeout_seconds, Some(5));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert_eq!(config.table.page_size, 25);
        assert_eq!(
            config.logging.file.as_deref(),
            Some("/tmp/survey-dashboard.log")
        );
        assert_eq!(
            config.repl.history_file.as_deref(),
            Some("/tmp/survey-history.txt")
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[table]
page_size = 50
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.table.page_size, 50);
        // Defaults should apply
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_seconds, Some(DEFAULT_TIMEOUT_SECONDS));
        assert!(config.output.color);
        assert!(config.logging.file.is_none());
        assert!(config.repl.history_file.is_none());
    }

    #[test]
    fn test_validate_default_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_base_url() {
        let config: FileConfig = toml::from_str("[api]\nbase_url = \"  \"\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyBaseUrl));
    }

    #[test]
    fn test_validate_scheme() {
        let config: FileConfig = toml::from_str("[api]\nbase_url = \"localhost:8000\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_validate_zero_values() {
        let config: FileConfig = toml::from_str("[table]\npage_size = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidPageSize));

        let config: FileConfig = toml::from_str("[api]\ntimeout_seconds = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }
}
