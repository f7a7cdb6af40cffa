//! Output formatter trait

use survey_application::{ChartPanel, Notice};
use survey_domain::{ChartViewModel, OutputFormat, TablePage, TableQuery};

use super::console::ConsoleFormatter;
use super::json::JsonFormatter;

/// Trait for rendering dashboard views
pub trait OutputFormatter {
    /// Format one page of the survey table
    fn format_table(&self, page: &TablePage<'_>, query: &TableQuery) -> String;

    /// Format a question chart (or its raw response when it has no chart)
    fn format_chart(&self, panel: &ChartPanel) -> String;

    /// Format the sentiment summary
    fn format_summary(&self, summary: &ChartViewModel) -> String;

    /// Format a success or error notice
    fn format_notice(&self, notice: &Notice) -> String;
}

/// Formatter for the configured output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter + Send + Sync> {
    match format {
        OutputFormat::Table => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
