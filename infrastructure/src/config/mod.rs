//! Configuration file loading for survey-dashboard
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SURVEY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./survey-dashboard.toml` or `./.survey-dashboard.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/survey-dashboard/config.toml`
//! 5. Fallback: `~/.config/survey-dashboard/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS, FileApiConfig, FileConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileReplConfig, FileTableConfig,
};
pub use loader::{ConfigError, ConfigLoader};
