//! Application-level configuration.
//!
//! Controls how use cases and the dashboard controller behave.

use std::time::Duration;
use survey_domain::table::query::DEFAULT_PAGE_SIZE;

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a backend response before giving up.
    pub timeout: Option<Duration>,
    /// Rows per table page.
    pub page_size: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.map(Duration::from_secs),
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}
