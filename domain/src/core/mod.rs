//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ValidationError`]: client-side validation failures
//! - [`string`]: label truncation helpers

pub mod error;
pub mod string;
