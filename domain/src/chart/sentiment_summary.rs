//! Fixed three-category sentiment chart

use super::view_model::{ChartKind, ChartPoint, ChartViewModel};
use crate::survey::record::SurveyRecord;
use crate::survey::sentiment::Sentiment;
use std::collections::HashMap;

/// Response count per sentiment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentCounts {
    /// Count sentiments of loaded records (records without a label are skipped)
    pub fn from_records(records: &[SurveyRecord]) -> Self {
        let mut counts = Self::default();
        for sentiment in records.iter().filter_map(|r| r.sentiment_label) {
            let slot = counts.get_mut(sentiment);
            *slot = slot.saturating_add(1);
        }
        counts
    }

    /// Read a label → count mapping; unknown labels are ignored and labels
    /// differing only in case add up (saturating)
    pub fn from_map<K: AsRef<str>>(map: &HashMap<K, u64>) -> Self {
        let mut counts = Self::default();
        for (label, count) in map {
            if let Ok(sentiment) = label.as_ref().parse::<Sentiment>() {
                let slot = counts.get_mut(sentiment);
                *slot = slot.saturating_add(*count);
            }
        }
        counts
    }

    pub fn get(&self, sentiment: Sentiment) -> u64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    fn get_mut(&mut self, sentiment: Sentiment) -> &mut u64 {
        match sentiment {
            Sentiment::Positive => &mut self.positive,
            Sentiment::Negative => &mut self.negative,
            Sentiment::Neutral => &mut self.neutral,
        }
    }
}

/// Always three points, Positive, Negative, Neutral, in that order
pub fn sentiment_summary(counts: &SentimentCounts) -> ChartViewModel {
    ChartViewModel::new(
        ChartKind::CategoryDistribution,
        Sentiment::ALL
            .iter()
            .map(|s| ChartPoint::new(s.as_str(), counts.get(*s) as f64))
            .collect(),
    )
    .with_title("Sentiment Summary")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_are_zero() {
        let map = HashMap::from([("Positive", 3u64)]);
        let vm = sentiment_summary(&SentimentCounts::from_map(&map));
        assert_eq!(vm.labels(), vec!["Positive", "Negative", "Neutral"]);
        assert_eq!(vm.values(), vec![3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_fixed_order_regardless_of_input() {
        let map = HashMap::from([
            ("Neutral".to_string(), 1u64),
            ("Negative".to_string(), 2u64),
            ("Mixed".to_string(), 9u64),
        ]);
        let vm = sentiment_summary(&SentimentCounts::from_map(&map));
        assert_eq!(vm.labels(), vec!["Positive", "Negative", "Neutral"]);
        assert_eq!(vm.values(), vec![0.0, 2.0, 1.0]);
    }

    #[test]
    fn test_case_variants_add_up_without_overflow() {
        let map = HashMap::from([("Positive", u64::MAX), ("positive", 5u64), ("NEUTRAL", 2u64)]);
        let counts = SentimentCounts::from_map(&map);
        assert_eq!(counts.positive, u64::MAX);
        assert_eq!(counts.neutral, 2);

        let map = HashMap::from([("Negative", 4u64), ("negative", 3u64)]);
        assert_eq!(SentimentCounts::from_map(&map).negative, 7);
    }

    #[test]
    fn test_empty_input() {
        let vm = sentiment_summary(&SentimentCounts::default());
        assert_eq!(vm.points.len(), 3);
        assert_eq!(vm.total(), 0.0);
    }

    #[test]
    fn test_from_records() {
        let mut a = SurveyRecord::new(1);
        a.sentiment_label = Some(Sentiment::Negative);
        let mut b = SurveyRecord::new(2);
        b.sentiment_label = Some(Sentiment::Negative);
        let c = SurveyRecord::new(3);
        let counts = SentimentCounts::from_records(&[a, b, c]);
        assert_eq!(counts.negative, 2);
        assert_eq!(counts.positive, 0);
    }
}
