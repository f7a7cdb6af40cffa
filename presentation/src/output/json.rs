//! JSON output for scripting

use crate::output::formatter::OutputFormatter;
use serde::Serialize;
use survey_application::{ChartPanel, Notice};
use survey_domain::{ChartViewModel, SortSpec, SurveyRecord, TablePage, TableQuery};

/// Formats dashboard views as pretty-printed JSON
pub struct JsonFormatter;

#[derive(Serialize)]
struct TableOutput<'a> {
    page: usize,
    total_pages: usize,
    total_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<SortOutput>,
    rows: &'a [&'a SurveyRecord],
}

#[derive(Serialize)]
struct SortOutput {
    column: &'static str,
    descending: bool,
}

impl From<SortSpec> for SortOutput {
    fn from(sort: SortSpec) -> Self {
        Self {
            column: sort.column.key(),
            descending: sort.descending,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

impl OutputFormatter for JsonFormatter {
    fn format_table(&self, page: &TablePage<'_>, query: &TableQuery) -> String {
        to_json(&TableOutput {
            page: page.page,
            total_pages: page.total_pages,
            total_rows: page.total_rows,
            filter: query.filter.as_deref(),
            sort: query.sort.map(SortOutput::from),
            rows: &page.rows,
        })
    }

    fn format_chart(&self, panel: &ChartPanel) -> String {
        to_json(panel)
    }

    fn format_summary(&self, summary: &ChartViewModel) -> String {
        to_json(summary)
    }

    fn format_notice(&self, notice: &Notice) -> String {
        to_json(notice)
    }
}
