//! Output format value object

use serde::{Deserialize, Serialize};

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Formatted tables and bar charts (default)
    #[default]
    Table,
    /// JSON output
    Json,
}
