//! View-model builder: raw question responses to [`ChartViewModel`]

use super::view_model::{ChartKind, ChartPoint, ChartViewModel};
use crate::aggregate::{QuestionAggregate, ResponseCount};
use crate::core::string::truncate_label;
use crate::survey::question::{GroupBy, QuestionKind};
use serde_json::Value;

/// Number of open-ended answers shown in a top-frequency chart
pub const TOP_RESPONSES: usize = 5;

/// Maximum label length (in characters) before truncation
pub const MAX_LABEL_CHARS: usize = 30;

/// Label used for blank open-ended answers
pub const BLANK_RESPONSE_LABEL: &str = "(blank)";

const GROUPED_OPEN_ENDED_REASON: &str =
    "Open-ended responses with grouping cannot be visualized effectively with a chart";

/// Build the chart view-model for one question response.
///
/// Never fails: a response that does not match the shape expected for
/// `(is_rating_question, group_by)` yields [`ChartKind::Unsupported`].
pub fn build(
    question_id: &str,
    is_rating_question: bool,
    group_by: Option<GroupBy>,
    raw: &Value,
) -> ChartViewModel {
    let kind = if is_rating_question {
        QuestionKind::Rating
    } else {
        QuestionKind::OpenEnded
    };

    // Grouped open-ended answers are never charted, whatever the body holds
    if kind == QuestionKind::OpenEnded && group_by.is_some() {
        return ChartViewModel::unsupported(GROUPED_OPEN_ENDED_REASON);
    }

    match QuestionAggregate::decode(kind, group_by, raw) {
        Ok(aggregate) => from_aggregate(&aggregate),
        Err(e) => ChartViewModel::unsupported(format!(
            "Unexpected response for {}: {}",
            question_id, e
        )),
    }
}

/// Map a decoded aggregate to its chart (one chart kind per variant)
pub fn from_aggregate(aggregate: &QuestionAggregate) -> ChartViewModel {
    match aggregate {
        QuestionAggregate::RatingDistribution(dist) => ChartViewModel::new(
            ChartKind::CategoryDistribution,
            dist.buckets
                .iter()
                .map(|(label, count)| ChartPoint::new(label.clone(), *count as f64))
                .collect(),
        ),
        QuestionAggregate::GroupedAverages(rows) => ChartViewModel::new(
            ChartKind::GroupedAverage,
            rows.iter()
                .map(|r| ChartPoint::new(r.group.clone(), r.average))
                .collect(),
        ),
        QuestionAggregate::ResponseCounts(responses) => {
            ChartViewModel::new(ChartKind::TopFrequency, top_responses(responses))
        }
        QuestionAggregate::GroupedResponses(_) => {
            ChartViewModel::unsupported(GROUPED_OPEN_ENDED_REASON)
        }
    }
}

/// Most frequent answers, descending by count (stable for ties)
fn top_responses(responses: &[ResponseCount]) -> Vec<ChartPoint> {
    let mut sorted: Vec<&ResponseCount> = responses.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted
        .into_iter()
        .take(TOP_RESPONSES)
        .map(|r| {
            let label = r
                .response
                .as_deref()
                .map(|text| truncate_label(text, MAX_LABEL_CHARS))
                .unwrap_or_else(|| BLANK_RESPONSE_LABEL.to_string());
            ChartPoint::new(label, r.count as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rating_distribution() {
        let raw = json!([{"distribution": {"1": 2, "2": 5}}]);
        let vm = build("q1_rating", true, None, &raw);
        assert_eq!(vm.kind, ChartKind::CategoryDistribution);
        assert_eq!(vm.labels(), vec!["1", "2"]);
        assert_eq!(vm.values(), vec![2.0, 5.0]);
        assert_eq!(vm.title, "Rating Distribution");
    }

    #[test]
    fn test_rating_distribution_full_scale_order() {
        let raw = json!([{
            "average": 3.0, "min": 1, "max": 5, "count": 15,
            "distribution": {"5": 1, "3": 3, "1": 4, "4": 2, "2": 5}
        }]);
        let vm = build("q2_rating", true, None, &raw);
        assert_eq!(vm.labels(), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(vm.values(), vec![4.0, 5.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_grouped_average_preserves_order() {
        let raw = json!([
            {"group": "Male", "average": 3.2},
            {"group": "Female", "average": 3.8}
        ]);
        let vm = build("q1_rating", true, Some(GroupBy::Gender), &raw);
        assert_eq!(vm.kind, ChartKind::GroupedAverage);
        assert_eq!(vm.labels(), vec!["Male", "Female"]);
        assert_eq!(vm.values(), vec![3.2, 3.8]);
        assert_eq!(vm.series_label, "Average Rating");
    }

    #[test]
    fn test_grouped_average_does_not_resort() {
        let raw = json!([
            {"group": "Zeta", "average": 1.0},
            {"group": "Alpha", "average": 5.0}
        ]);
        let vm = build("q4_rating", true, Some(GroupBy::EducationLevel), &raw);
        assert_eq!(vm.labels(), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_top_frequency_takes_five_descending() {
        let responses: Vec<_> = [
            ("alpha", 1),
            ("beta", 7),
            ("gamma", 3),
            ("delta", 9),
            ("epsilon", 2),
            ("zeta", 5),
            ("this answer is definitely longer than thirty characters", 4),
        ]
        .iter()
        .map(|(r, c)| json!({"response": r, "count": c}))
        .collect();
        let raw = json!([{ "responses": responses }]);

        let vm = build("q3_open", false, None, &raw);
        assert_eq!(vm.kind, ChartKind::TopFrequency);
        assert_eq!(vm.points.len(), 5);
        assert_eq!(vm.values(), vec![9.0, 7.0, 5.0, 4.0, 3.0]);
        assert_eq!(vm.labels()[0], "delta");
        assert_eq!(vm.labels()[3], "this answer is definitely long...");
        assert!(vm.labels().iter().all(|l| l.chars().count() <= 33));
    }

    #[test]
    fn test_top_frequency_ties_keep_server_order() {
        let raw = json!([{"responses": [
            {"response": "first", "count": 2},
            {"response": "second", "count": 2},
            {"response": null, "count": 3}
        ]}]);
        let vm = build("q5_open", false, None, &raw);
        assert_eq!(vm.labels(), vec!["(blank)", "first", "second"]);
    }

    #[test]
    fn test_grouped_open_ended_is_unsupported() {
        let raw = json!([{"group": "Male", "responses": [{"response": "ok", "count": 1}]}]);
        for group_by in GroupBy::ALL {
            let vm = build("q3_open", false, Some(group_by), &raw);
            assert_eq!(vm.kind, ChartKind::Unsupported);
        }
        // Even a body that would decode as something else
        let vm = build("q3_open", false, Some(GroupBy::Age), &json!(null));
        assert_eq!(vm.kind, ChartKind::Unsupported);
    }

    #[test]
    fn test_missing_distribution_is_unsupported() {
        let raw = json!([{"average": 3.2, "count": 10}]);
        let vm = build("q1_rating", true, None, &raw);
        assert_eq!(vm.kind, ChartKind::Unsupported);
        assert!(vm.reason.unwrap().contains("distribution"));
    }

    #[test]
    fn test_malformed_bodies_are_unsupported() {
        let cases = [
            (true, None, json!({"distribution": {"1": 2}})),
            (true, None, json!([])),
            (true, Some(GroupBy::Gender), json!([{"group": "Male", "average": "high"}])),
            (false, None, json!([{"responses": [{"response": "x", "count": -1}]}])),
            (false, None, json!([{"answers": []}])),
            (false, None, json!("not json we know")),
        ];
        for (is_rating, group_by, raw) in cases {
            let vm = build("q", is_rating, group_by, &raw);
            assert_eq!(vm.kind, ChartKind::Unsupported, "body: {}", raw);
        }
    }

    #[test]
    fn test_grouped_empty_array_is_empty_chart() {
        let vm = build("q1_rating", true, Some(GroupBy::Age), &json!([]));
        assert_eq!(vm.kind, ChartKind::GroupedAverage);
        assert!(vm.points.is_empty());
    }
}
