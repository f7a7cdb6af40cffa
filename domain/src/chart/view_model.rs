//! Chart view-model: the uniform shape consumed by renderers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of chart a view-model describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// Count per rating value (rendered as a pie/share chart)
    CategoryDistribution,
    /// Average rating per demographic group
    GroupedAverage,
    /// Most common open-ended answers
    TopFrequency,
    /// No chart; the caller shows the raw response instead
    Unsupported,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::CategoryDistribution => "category-distribution",
            ChartKind::GroupedAverage => "grouped-average",
            ChartKind::TopFrequency => "top-frequency",
            ChartKind::Unsupported => "unsupported",
        }
    }

    /// Default chart title for this kind
    pub fn default_title(&self) -> &'static str {
        match self {
            ChartKind::CategoryDistribution => "Rating Distribution",
            ChartKind::GroupedAverage => "Average Ratings by Group",
            ChartKind::TopFrequency => "Most Common Responses",
            ChartKind::Unsupported => "No chart available",
        }
    }

    /// Label of the plotted series
    pub fn series_label(&self) -> &'static str {
        match self {
            ChartKind::GroupedAverage => "Average Rating",
            _ => "Number of Responses",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `(label, value)` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Normalized chart data (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartViewModel {
    pub kind: ChartKind,
    pub title: String,
    pub series_label: String,
    pub points: Vec<ChartPoint>,
    /// Why no chart was produced (only for [`ChartKind::Unsupported`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ChartViewModel {
    pub fn new(kind: ChartKind, points: Vec<ChartPoint>) -> Self {
        Self {
            kind,
            title: kind.default_title().to_string(),
            series_label: kind.series_label().to_string(),
            points,
            reason: None,
        }
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::new(ChartKind::Unsupported, Vec::new())
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn is_supported(&self) -> bool {
        self.kind != ChartKind::Unsupported
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Largest value, or 0 for an empty chart
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ChartKind::CategoryDistribution).unwrap();
        assert_eq!(json, "\"category-distribution\"");
        assert_eq!(ChartKind::TopFrequency.to_string(), "top-frequency");
    }

    #[test]
    fn test_unsupported_has_no_points() {
        let vm = ChartViewModel::unsupported("grouped open-ended responses");
        assert!(!vm.is_supported());
        assert!(vm.points.is_empty());
        assert_eq!(vm.reason.as_deref(), Some("grouped open-ended responses"));
    }

    #[test]
    fn test_max_and_total() {
        let vm = ChartViewModel::new(
            ChartKind::CategoryDistribution,
            vec![ChartPoint::new("1", 2.0), ChartPoint::new("2", 5.0)],
        );
        assert_eq!(vm.max_value(), 5.0);
        assert_eq!(vm.total(), 7.0);
        assert_eq!(ChartViewModel::unsupported("x").max_value(), 0.0);
    }

    #[test]
    fn test_series_labels() {
        assert_eq!(ChartKind::GroupedAverage.series_label(), "Average Rating");
        assert_eq!(ChartKind::TopFrequency.series_label(), "Number of Responses");
    }
}
