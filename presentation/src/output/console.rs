//! Console output formatter for dashboard views

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use survey_application::{ChartPanel, Notice, NoticeLevel};
use survey_domain::core::string::fit_width;
use survey_domain::{ChartKind, ChartViewModel, SurveyColumn, TablePage, TableQuery};

/// Widest a table cell may get before it is cut
const MAX_CELL_WIDTH: usize = 24;

/// Length of the longest bar in a chart
const BAR_WIDTH: usize = 40;

/// Formats dashboard views for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one page of the survey table
    pub fn format_table(page: &TablePage<'_>, query: &TableQuery) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Survey Results"));
        output.push('\n');

        if page.is_empty() {
            output.push_str(&format!("\n{}\n", "No survey records to show.".dimmed()));
            output.push_str(&Self::table_footer(page, query));
            return output;
        }

        let cells: Vec<Vec<String>> = page
            .rows
            .iter()
            .map(|record| {
                SurveyColumn::ALL
                    .iter()
                    .map(|c| c.cell(record).display())
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = SurveyColumn::ALL
            .iter()
            .enumerate()
            .map(|(i, column)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(column.label().chars().count()))
                    .max()
                    .unwrap_or(0)
                    .min(MAX_CELL_WIDTH)
            })
            .collect();

        let header: Vec<String> = SurveyColumn::ALL
            .iter()
            .zip(&widths)
            .map(|(column, width)| {
                let label = match query.sort {
                    Some(sort) if sort.column == *column => {
                        let arrow = if sort.descending { "v" } else { "^" };
                        format!("{}{}", column.label(), arrow)
                    }
                    _ => column.label().to_string(),
                };
                Self::pad(&label, *width)
            })
            .collect();
        output.push_str(&format!("{}\n", header.join(" | ").cyan().bold()));
        output.push_str(&format!(
            "{}\n",
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-")
        ));

        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| Self::pad(cell, *width))
                .collect();
            output.push_str(&line.join(" | "));
            output.push('\n');
        }

        output.push_str(&Self::table_footer(page, query));
        output
    }

    /// Format a question chart, falling back to the raw response
    pub fn format_chart(panel: &ChartPanel) -> String {
        let mut output = String::new();
        output.push_str(&Self::header(panel.question.title()));
        output.push('\n');

        if let Some(group_by) = panel.group_by {
            output.push_str(&format!("{}\n", group_by.label().cyan().bold()));
        }

        if panel.view_model.is_supported() {
            output.push_str(&Self::chart_body(&panel.view_model));
        } else {
            if let Some(reason) = &panel.view_model.reason {
                output.push_str(&format!("\n{}\n", reason.yellow()));
            }
            output.push_str(&Self::section_header("Raw response"));
            output.push_str(
                &serde_json::to_string_pretty(&panel.raw).unwrap_or_else(|_| "null".to_string()),
            );
            output.push('\n');
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the sentiment summary
    pub fn format_summary(summary: &ChartViewModel) -> String {
        let mut output = String::new();
        output.push_str(&Self::header(&summary.title));
        output.push('\n');
        output.push_str(&Self::chart_body(summary));
        output.push_str(&Self::footer());
        output
    }

    pub fn format_notice(notice: &Notice) -> String {
        match notice.level {
            NoticeLevel::Success => format!("{} {}", "v".green(), notice.message.green()),
            NoticeLevel::Error => format!("{} {}", "x".red(), notice.message.red().bold()),
        }
    }

    /// Horizontal bars, one per point
    fn chart_body(chart: &ChartViewModel) -> String {
        let mut output = format!(
            "\n{} {}\n",
            chart.title.bold(),
            format!("({})", chart.series_label).dimmed()
        );

        if chart.points.is_empty() {
            output.push_str(&format!("{}\n", "No data to chart.".dimmed()));
            return output;
        }

        let label_width = chart
            .points
            .iter()
            .map(|p| p.label.chars().count())
            .max()
            .unwrap_or(0);
        let max = chart.max_value();
        let total = chart.total();

        for point in &chart.points {
            let len = if max > 0.0 {
                ((point.value / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let value = match chart.kind {
                ChartKind::GroupedAverage => format!("{:.2}", point.value),
                // Distributions read as shares of the whole
                ChartKind::CategoryDistribution if total > 0.0 => format!(
                    "{} ({:.1}%)",
                    point.value,
                    point.value / total * 100.0
                ),
                _ => format!("{}", point.value),
            };
            output.push_str(&format!(
                "  {} {} {}\n",
                Self::pad(&point.label, label_width),
                "#".repeat(len).cyan(),
                value
            ));
        }
        output
    }

    fn table_footer(page: &TablePage<'_>, query: &TableQuery) -> String {
        let mut parts = vec![format!(
            "Page {} of {} ({} rows)",
            page.page, page.total_pages, page.total_rows
        )];
        if let Some(filter) = &query.filter {
            parts.push(format!("filter: \"{}\"", filter));
        }
        if let Some(sort) = query.sort {
            parts.push(format!(
                "sorted by {} {}",
                sort.column.label(),
                if sort.descending { "desc" } else { "asc" }
            ));
        }
        format!("\n{}\n", parts.join(" | ").dimmed())
    }

    fn pad(text: &str, width: usize) -> String {
        let fitted = fit_width(text, width);
        let fill = width.saturating_sub(fitted.chars().count());
        format!("{}{}", fitted, " ".repeat(fill))
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_table(&self, page: &TablePage<'_>, query: &TableQuery) -> String {
        Self::format_table(page, query)
    }

    fn format_chart(&self, panel: &ChartPanel) -> String {
        Self::format_chart(panel)
    }

    fn format_summary(&self, summary: &ChartViewModel) -> String {
        Self::format_summary(summary)
    }

    fn format_notice(&self, notice: &Notice) -> String {
        Self::format_notice(notice)
    }
}
