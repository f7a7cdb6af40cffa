//! Domain layer for survey-dashboard
//!
//! This crate contains survey records, question identifiers, aggregate
//! decoding and the chart/table view-models. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Question aggregates
//!
//! The backend summarizes one question at a time, optionally grouped by a
//! demographic field. [`QuestionAggregate`] is the tagged union of the four
//! shapes it can answer with.
//!
//! ## Chart view-models
//!
//! [`chart::builder::build`] turns a raw aggregate response into a
//! [`ChartViewModel`]: ordered `(label, value)` points and a [`ChartKind`] tag.
//! Responses that do not match the expected shape become
//! [`ChartKind::Unsupported`] instead of an error.

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod core;
pub mod survey;
pub mod table;

// Re-export commonly used types
pub use aggregate::{AggregateError, QuestionAggregate};
pub use chart::{
    builder::{build as build_chart, from_aggregate},
    sentiment_summary::{SentimentCounts, sentiment_summary},
    view_model::{ChartKind, ChartPoint, ChartViewModel},
};
pub use config::OutputFormat;
pub use core::error::ValidationError;
pub use survey::{
    question::{GroupBy, QuestionId, QuestionKind},
    record::SurveyRecord,
    sentiment::Sentiment,
    upload::CsvUpload,
};
pub use table::{
    column::{Cell, SurveyColumn},
    query::{SortSpec, TablePage, TableQuery},
};
