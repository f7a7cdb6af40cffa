//! Presentation-level configuration
//!
//! Configuration for output formatting and the interactive session.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use survey_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show a spinner while requests run
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Apply the color setting process-wide; JSON output is never colored
    pub fn apply_color(&self) {
        if !self.color || self.format == OutputFormat::Json {
            colored::control::set_override(false);
        }
    }

    /// Spinners would corrupt machine-readable output
    pub fn progress_enabled(&self) -> bool {
        self.show_progress && self.format != OutputFormat::Json
    }
}

/// Interactive session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Path to history file; defaults to the user's data directory
    pub history_file: Option<PathBuf>,
}

impl ReplConfig {
    /// History file to use, if any location is available
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file.clone().or_else(|| {
            dirs::data_dir().map(|p| p.join("survey-dashboard").join("history.txt"))
        })
    }
}
