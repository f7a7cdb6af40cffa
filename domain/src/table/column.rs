//! Table columns over [`SurveyRecord`]

use crate::core::error::ValidationError;
use crate::survey::record::SurveyRecord;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Text shown for missing cells
pub const MISSING_CELL: &str = "-";

/// A displayed column of the survey table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurveyColumn {
    Id,
    Age,
    Gender,
    EducationLevel,
    State,
    City,
    Income,
    Q1Rating,
    Q2Rating,
    Q3Open,
    Q4Rating,
    Q5Open,
    Sentiment,
}

/// Value of one table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Number(i64),
    Text(&'a str),
    Missing,
}

impl Cell<'_> {
    pub fn display(&self) -> String {
        match self {
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) if s.is_empty() => MISSING_CELL.to_string(),
            Cell::Text(s) => s.to_string(),
            Cell::Missing => MISSING_CELL.to_string(),
        }
    }

    /// No value, or an empty string; shown as the placeholder
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing) || matches!(self, Cell::Text(s) if s.is_empty())
    }

    /// Ordering of two present cells (numbers before text)
    fn cmp_present(&self, other: &Cell<'_>) -> Ordering {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a.cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Cell::Number(_), _) => Ordering::Less,
            (_, Cell::Number(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

/// Compare two cells for sorting; missing cells sort last in either direction
pub fn compare_cells(a: &Cell<'_>, b: &Cell<'_>, descending: bool) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.cmp_present(b);
            if descending { ord.reverse() } else { ord }
        }
    }
}

impl SurveyColumn {
    pub const ALL: [SurveyColumn; 13] = [
        SurveyColumn::Id,
        SurveyColumn::Age,
        SurveyColumn::Gender,
        SurveyColumn::EducationLevel,
        SurveyColumn::State,
        SurveyColumn::City,
        SurveyColumn::Income,
        SurveyColumn::Q1Rating,
        SurveyColumn::Q2Rating,
        SurveyColumn::Q3Open,
        SurveyColumn::Q4Rating,
        SurveyColumn::Q5Open,
        SurveyColumn::Sentiment,
    ];

    /// Record field name
    pub fn key(&self) -> &'static str {
        match self {
            SurveyColumn::Id => "id",
            SurveyColumn::Age => "age",
            SurveyColumn::Gender => "gender",
            SurveyColumn::EducationLevel => "education_level",
            SurveyColumn::State => "state",
            SurveyColumn::City => "city",
            SurveyColumn::Income => "income",
            SurveyColumn::Q1Rating => "q1_rating",
            SurveyColumn::Q2Rating => "q2_rating",
            SurveyColumn::Q3Open => "q3_open",
            SurveyColumn::Q4Rating => "q4_rating",
            SurveyColumn::Q5Open => "q5_open",
            SurveyColumn::Sentiment => "sentiment_label",
        }
    }

    /// Column header
    pub fn label(&self) -> &'static str {
        match self {
            SurveyColumn::Id => "ID",
            SurveyColumn::Age => "Age",
            SurveyColumn::Gender => "Gender",
            SurveyColumn::EducationLevel => "Education Level",
            SurveyColumn::State => "State",
            SurveyColumn::City => "City",
            SurveyColumn::Income => "Income",
            SurveyColumn::Q1Rating => "Q1 Rating",
            SurveyColumn::Q2Rating => "Q2 Rating",
            SurveyColumn::Q3Open => "Q3 Response",
            SurveyColumn::Q4Rating => "Q4 Rating",
            SurveyColumn::Q5Open => "Q5 Response",
            SurveyColumn::Sentiment => "Sentiment",
        }
    }

    pub fn cell<'a>(&self, record: &'a SurveyRecord) -> Cell<'a> {
        fn num(v: Option<i64>) -> Cell<'static> {
            v.map(Cell::Number).unwrap_or(Cell::Missing)
        }
        fn text(v: &Option<String>) -> Cell<'_> {
            v.as_deref().map(Cell::Text).unwrap_or(Cell::Missing)
        }

        match self {
            SurveyColumn::Id => Cell::Number(record.id),
            SurveyColumn::Age => num(record.age),
            SurveyColumn::Gender => text(&record.gender),
            SurveyColumn::EducationLevel => text(&record.education_level),
            SurveyColumn::State => text(&record.state),
            SurveyColumn::City => text(&record.city),
            SurveyColumn::Income => text(&record.income),
            SurveyColumn::Q1Rating => num(record.q1_rating),
            SurveyColumn::Q2Rating => num(record.q2_rating),
            SurveyColumn::Q3Open => text(&record.q3_open),
            SurveyColumn::Q4Rating => num(record.q4_rating),
            SurveyColumn::Q5Open => text(&record.q5_open),
            SurveyColumn::Sentiment => record
                .sentiment_label
                .map(|s| Cell::Text(s.as_str()))
                .unwrap_or(Cell::Missing),
        }
    }
}

impl fmt::Display for SurveyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for SurveyColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace(&[' ', '-'][..], "_");
        SurveyColumn::ALL
            .into_iter()
            .find(|c| {
                c.key() == needle
                    || c.label().to_lowercase().replace(' ', "_") == needle
                    || (needle == "sentiment" && *c == SurveyColumn::Sentiment)
                    || (needle == "education" && *c == SurveyColumn::EducationLevel)
            })
            .ok_or_else(|| ValidationError::UnknownColumn(s.to_string()))
    }
}
