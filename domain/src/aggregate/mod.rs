//! Question aggregates returned by the backend
//!
//! The backend answers `GET /questions/{id}` with one of four JSON shapes
//! depending on the question kind and whether `group_by` was set. The shape is
//! selected from the request, never guessed from the response: decoding runs
//! exactly one schema check and reports [`AggregateError`] when it fails.

use crate::survey::question::{GroupBy, QuestionKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use thiserror::Error;

/// Reasons a raw response does not match its expected shape
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    #[error("response is empty")]
    Empty,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Overall rating statistics (ungrouped rating question)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingDistribution {
    /// `(rating label, response count)` in ascending rating order
    pub buckets: Vec<(String, u64)>,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub count: Option<u64>,
}

/// Average rating for one demographic group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAverage {
    pub group: String,
    pub average: f64,
    pub count: Option<u64>,
}

/// Occurrence count of one distinct open-ended answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseCount {
    /// `None` when the backend reports a blank answer
    pub response: Option<String>,
    pub count: u64,
}

/// Open-ended answer counts within one demographic group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupResponses {
    pub group: String,
    pub responses: Vec<ResponseCount>,
}

/// Summary of one question, optionally grouped (tagged union)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum QuestionAggregate {
    /// Ungrouped rating question
    RatingDistribution(RatingDistribution),
    /// Rating question grouped by a demographic field
    GroupedAverages(Vec<GroupAverage>),
    /// Ungrouped open-ended question
    ResponseCounts(Vec<ResponseCount>),
    /// Open-ended question grouped by a demographic field
    GroupedResponses(Vec<GroupResponses>),
}

// ==================== Wire shapes ====================

#[derive(Deserialize)]
struct DistributionWire {
    distribution: Option<BTreeMap<String, u64>>,
    #[serde(default)]
    average: Option<f64>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    count: Option<u64>,
}

#[derive(Deserialize)]
struct GroupAverageWire {
    #[serde(default)]
    group: Value,
    average: f64,
    #[serde(default)]
    count: Option<u64>,
}

#[derive(Deserialize)]
struct ResponseCountWire {
    #[serde(default)]
    response: Option<String>,
    count: u64,
}

#[derive(Deserialize)]
struct ResponsesWire {
    responses: Option<Vec<ResponseCountWire>>,
}

#[derive(Deserialize)]
struct GroupResponsesWire {
    #[serde(default)]
    group: Value,
    responses: Vec<ResponseCountWire>,
}

impl From<ResponseCountWire> for ResponseCount {
    fn from(wire: ResponseCountWire) -> Self {
        Self {
            response: wire.response,
            count: wire.count,
        }
    }
}

impl QuestionAggregate {
    /// Decode the raw response expected for `(kind, group_by)`
    pub fn decode(
        kind: QuestionKind,
        group_by: Option<GroupBy>,
        raw: &Value,
    ) -> Result<Self, AggregateError> {
        match (kind, group_by) {
            (QuestionKind::Rating, None) => decode_distribution(raw),
            (QuestionKind::Rating, Some(_)) => {
                let rows: Vec<GroupAverageWire> = decode_array(raw)?;
                Ok(QuestionAggregate::GroupedAverages(
                    rows.into_iter()
                        .map(|r| GroupAverage {
                            group: group_label(&r.group),
                            average: r.average,
                            count: r.count,
                        })
                        .collect(),
                ))
            }
            (QuestionKind::OpenEnded, None) => {
                let rows: Vec<ResponsesWire> = decode_array(raw)?;
                let first = rows.into_iter().next().ok_or(AggregateError::Empty)?;
                let responses = first
                    .responses
                    .ok_or(AggregateError::MissingField("responses"))?;
                Ok(QuestionAggregate::ResponseCounts(
                    responses.into_iter().map(Into::into).collect(),
                ))
            }
            (QuestionKind::OpenEnded, Some(_)) => {
                let rows: Vec<GroupResponsesWire> = decode_array(raw)?;
                Ok(QuestionAggregate::GroupedResponses(
                    rows.into_iter()
                        .map(|r| GroupResponses {
                            group: group_label(&r.group),
                            responses: r.responses.into_iter().map(Into::into).collect(),
                        })
                        .collect(),
                ))
            }
        }
    }
}

fn decode_distribution(raw: &Value) -> Result<QuestionAggregate, AggregateError> {
    let rows: Vec<DistributionWire> = decode_array(raw)?;
    let first = rows.into_iter().next().ok_or(AggregateError::Empty)?;
    let distribution = first
        .distribution
        .ok_or(AggregateError::MissingField("distribution"))?;

    let mut buckets: Vec<(String, u64)> = distribution.into_iter().collect();
    buckets.sort_by(|(a, _), (b, _)| compare_rating_labels(a, b));

    Ok(QuestionAggregate::RatingDistribution(RatingDistribution {
        buckets,
        average: first.average,
        min: first.min,
        max: first.max,
        count: first.count,
    }))
}

fn decode_array<T: for<'de> Deserialize<'de>>(raw: &Value) -> Result<Vec<T>, AggregateError> {
    if !raw.is_array() {
        return Err(AggregateError::Malformed("expected a JSON array".to_string()));
    }
    Vec::<T>::deserialize(raw).map_err(|e| AggregateError::Malformed(e.to_string()))
}

/// Numeric labels ascending, then non-numeric labels lexically
fn compare_rating_labels(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Display label for a group value (groups may be strings, numbers or null)
pub fn group_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "Unknown".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_distribution_sorted_numerically() {
        let raw = json!([{
            "average": 3.1, "min": 1, "max": 10, "count": 17,
            "distribution": {"10": 1, "2": 5, "1": 2}
        }]);
        let agg = QuestionAggregate::decode(QuestionKind::Rating, None, &raw).unwrap();
        let QuestionAggregate::RatingDistribution(dist) = agg else {
            panic!("expected distribution");
        };
        let labels: Vec<_> = dist.buckets.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "10"]);
        assert_eq!(dist.count, Some(17));
        assert_eq!(dist.min, Some(1.0));
    }

    #[test]
    fn test_decode_distribution_missing_field() {
        let raw = json!([{"average": 3.0}]);
        assert_eq!(
            QuestionAggregate::decode(QuestionKind::Rating, None, &raw),
            Err(AggregateError::MissingField("distribution"))
        );
    }

    #[test]
    fn test_decode_distribution_empty_array() {
        let raw = json!([]);
        assert_eq!(
            QuestionAggregate::decode(QuestionKind::Rating, None, &raw),
            Err(AggregateError::Empty)
        );
    }

    #[test]
    fn test_decode_rejects_object_body() {
        let raw = json!({"detail": "Invalid question ID"});
        assert!(matches!(
            QuestionAggregate::decode(QuestionKind::Rating, None, &raw),
            Err(AggregateError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_grouped_averages_keeps_order_and_labels() {
        let raw = json!([
            {"group": "Male", "average": 3.2, "count": 10},
            {"group": 34, "average": 4.0, "count": 2},
            {"group": null, "average": 1.5, "count": 1}
        ]);
        let agg =
            QuestionAggregate::decode(QuestionKind::Rating, Some(GroupBy::Age), &raw).unwrap();
        let QuestionAggregate::GroupedAverages(rows) = agg else {
            panic!("expected grouped averages");
        };
        let groups: Vec<_> = rows.iter().map(|r| r.group.as_str()).collect();
        assert_eq!(groups, vec!["Male", "34", "Unknown"]);
        assert_eq!(rows[0].count, Some(10));
    }

    #[test]
    fn test_decode_grouped_averages_missing_average() {
        let raw = json!([{"group": "Male"}]);
        assert!(matches!(
            QuestionAggregate::decode(QuestionKind::Rating, Some(GroupBy::Gender), &raw),
            Err(AggregateError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_response_counts() {
        let raw = json!([{"responses": [
            {"response": "Great", "count": 3},
            {"response": null, "count": 1}
        ]}]);
        let agg = QuestionAggregate::decode(QuestionKind::OpenEnded, None, &raw).unwrap();
        assert_eq!(
            agg,
            QuestionAggregate::ResponseCounts(vec![
                ResponseCount {
                    response: Some("Great".to_string()),
                    count: 3
                },
                ResponseCount {
                    response: None,
                    count: 1
                },
            ])
        );
    }

    #[test]
    fn test_decode_grouped_responses() {
        let raw = json!([
            {"group": "Female", "responses": [{"response": "Useful", "count": 2}]}
        ]);
        let agg =
            QuestionAggregate::decode(QuestionKind::OpenEnded, Some(GroupBy::Gender), &raw)
                .unwrap();
        let QuestionAggregate::GroupedResponses(groups) = agg else {
            panic!("expected grouped responses");
        };
        assert_eq!(groups[0].group, "Female");
        assert_eq!(groups[0].responses[0].count, 2);
    }
}
