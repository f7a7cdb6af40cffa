//! Infrastructure layer for survey-dashboard
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileApiConfig, FileConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileReplConfig, FileTableConfig,
};
pub use http::HttpSurveyGateway;
