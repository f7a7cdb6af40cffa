//! Client-side filter, sort and pagination over loaded records

use super::column::{SurveyColumn, compare_cells};
use crate::survey::record::SurveyRecord;
use serde::Serialize;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort order for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SurveyColumn,
    pub descending: bool,
}

impl SortSpec {
    pub fn ascending(column: SurveyColumn) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub fn descending(column: SurveyColumn) -> Self {
        Self {
            column,
            descending: true,
        }
    }
}

/// What part of the table the user is looking at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    /// Case-insensitive substring matched against every cell
    pub filter: Option<String>,
    pub sort: Option<SortSpec>,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            filter: None,
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One rendered page of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a SurveyRecord>,
    pub page: usize,
    pub total_pages: usize,
    /// Rows matching the filter (before pagination)
    pub total_rows: usize,
}

impl TableQuery {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.set_filter(Some(filter.into()));
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set or clear the filter; returns to the first page
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        self.page = 1;
    }

    fn matches(&self, record: &SurveyRecord) -> bool {
        let Some(filter) = &self.filter else {
            return true;
        };
        let needle = filter.to_lowercase();
        // The placeholder shown for missing cells is not data
        SurveyColumn::ALL.iter().any(|c| {
            let cell = c.cell(record);
            !cell.is_missing() && cell.display().to_lowercase().contains(&needle)
        })
    }

    /// Filter, sort and slice `records` into the requested page
    pub fn apply<'a>(&self, records: &'a [SurveyRecord]) -> TablePage<'a> {
        let mut rows: Vec<&SurveyRecord> = records.iter().filter(|r| self.matches(r)).collect();

        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| {
                compare_cells(&sort.column.cell(a), &sort.column.cell(b), sort.descending)
            });
        }

        let page_size = self.page_size.max(1);
        let total_rows = rows.len();
        let total_pages = total_rows.div_ceil(page_size).max(1);
        let page = self.page.clamp(1, total_pages);

        let rows = rows
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        TablePage {
            rows,
            page,
            total_pages,
            total_rows,
        }
    }
}

impl TablePage<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}
