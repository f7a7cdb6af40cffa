//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod dashboard_controller;
pub mod load_surveys;
pub(crate) mod shared;
pub mod upload_survey;
pub mod visualize_question;

#[cfg(test)]
pub(crate) mod test_support;
