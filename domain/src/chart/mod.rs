//! Chart view-models built from question aggregates and sentiment counts.

pub mod builder;
pub mod sentiment_summary;
pub mod view_model;
