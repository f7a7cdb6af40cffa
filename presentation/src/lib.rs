//! Presentation layer for survey-dashboard
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive dashboard session.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, TableArgs};
pub use config::{OutputConfig, ReplConfig};
pub use dashboard::DashboardRepl;
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, formatter_for};
pub use output::json::JsonFormatter;
pub use progress::reporter::ProgressReporter;
