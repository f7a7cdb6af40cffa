//! Progress notification port
//!
//! Defines the interface for reporting backend requests while they run.

use std::fmt;

/// A user-visible backend request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upload,
    LoadSurveys,
    FetchQuestion,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Upload => "Uploading",
            Operation::LoadSurveys => "Loading surveys",
            Operation::FetchQuestion => "Fetching question data",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during a request
///
/// Implementations live in the presentation layer (spinner, plain text, ...).
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the request is sent
    fn on_request_start(&self, operation: Operation);

    /// Called when the request has resolved
    fn on_request_complete(&self, operation: Operation, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_request_start(&self, _operation: Operation) {}
    fn on_request_complete(&self, _operation: Operation, _success: bool) {}
}
