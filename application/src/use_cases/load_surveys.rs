//! Load Surveys use case
//!
//! Fetches survey records, either the full list or those with one sentiment.
//! The backend caps `GET /surveys` at a page of rows, so the full list is
//! read page by page until a short page comes back.

use crate::ports::progress::{NoProgress, Operation, ProgressNotifier};
use crate::ports::survey_gateway::{GatewayError, SurveyFilter, SurveyGateway};
use crate::use_cases::shared::with_deadline;
use std::sync::Arc;
use std::time::Duration;
use survey_domain::{Sentiment, SurveyRecord};
use tracing::{debug, info, warn};

/// Shown when a fetch fails without a server message
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

/// Rows asked for per `GET /surveys` page (the backend's default cap)
pub const SURVEY_PAGE_LIMIT: u32 = 100;

/// Upper bound on pages per listing, for servers that ignore `skip`
const MAX_SURVEY_PAGES: u32 = 1_000;

/// Input for [`LoadSurveysUseCase`]
#[derive(Debug, Clone, Default)]
pub struct LoadSurveysInput {
    /// When set, only records with this sentiment are requested
    pub sentiment: Option<Sentiment>,
    /// Query parameters for the unfiltered listing. An explicit `limit`
    /// fetches that single window instead of every page.
    pub filter: SurveyFilter,
}

impl LoadSurveysInput {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_sentiment(sentiment: Option<Sentiment>) -> Self {
        Self {
            sentiment,
            ..Self::default()
        }
    }
}

/// Use case for fetching survey records
pub struct LoadSurveysUseCase<G: SurveyGateway + 'static> {
    gateway: Arc<G>,
    timeout: Option<Duration>,
    page_limit: u32,
}

impl<G: SurveyGateway + 'static> LoadSurveysUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            timeout: None,
            page_limit: SURVEY_PAGE_LIMIT,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    pub async fn execute(
        &self,
        input: &LoadSurveysInput,
    ) -> Result<Vec<SurveyRecord>, GatewayError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: &LoadSurveysInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<SurveyRecord>, GatewayError> {
        progress.on_request_start(Operation::LoadSurveys);

        // The sentiment endpoint has no query parameters of its own
        let result = match input.sentiment {
            Some(sentiment) => {
                debug!("Loading surveys with sentiment {}", sentiment);
                with_deadline(self.timeout, self.gateway.surveys_by_sentiment(sentiment)).await
            }
            None if input.filter.limit.is_some() => {
                debug!("Loading surveys with {:?}", input.filter);
                with_deadline(self.timeout, self.gateway.list_surveys(&input.filter)).await
            }
            None => self.list_all_pages(&input.filter).await,
        };
        progress.on_request_complete(Operation::LoadSurveys, result.is_ok());

        match &result {
            Ok(records) => info!("Loaded {} survey records", records.len()),
            Err(e) => warn!("Loading surveys failed: {}", e),
        }
        result
    }

    /// Walk `GET /surveys` with skip/limit until a short page comes back
    async fn list_all_pages(
        &self,
        filter: &SurveyFilter,
    ) -> Result<Vec<SurveyRecord>, GatewayError> {
        let mut records = Vec::new();
        let mut skip = filter.skip.unwrap_or(0);

        for page in 0..MAX_SURVEY_PAGES {
            let page_filter = SurveyFilter {
                skip: Some(skip),
                limit: Some(self.page_limit),
                ..filter.clone()
            };
            debug!("Loading survey page {} with {:?}", page + 1, page_filter);
            let rows =
                with_deadline(self.timeout, self.gateway.list_surveys(&page_filter)).await?;

            let fetched = rows.len();
            records.extend(rows);
            if fetched < self.page_limit as usize {
                return Ok(records);
            }
            skip = skip.saturating_add(self.page_limit);
        }

        warn!(
            "Stopped listing surveys after {} pages ({} records)",
            MAX_SURVEY_PAGES,
            records.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockGateway;

    #[tokio::test]
    async fn test_unfiltered_uses_listing() {
        let gateway = Arc::new(
            MockGateway::new().with_surveys(Ok(vec![SurveyRecord::new(1), SurveyRecord::new(2)])),
        );
        let use_case = LoadSurveysUseCase::new(gateway.clone());

        let records = use_case.execute(&LoadSurveysInput::all()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(gateway.survey_requests(), vec!["/surveys?skip=0&limit=100"]);
    }

    #[tokio::test]
    async fn test_full_pages_are_followed_and_merged() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_surveys(Ok(vec![SurveyRecord::new(1), SurveyRecord::new(2)]))
                .with_surveys(Ok(vec![SurveyRecord::new(3), SurveyRecord::new(4)]))
                .with_surveys(Ok(vec![SurveyRecord::new(5)])),
        );
        let use_case = LoadSurveysUseCase::new(gateway.clone()).with_page_limit(2);

        let records = use_case.execute(&LoadSurveysInput::all()).await.unwrap();
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            gateway.survey_requests(),
            vec![
                "/surveys?skip=0&limit=2",
                "/surveys?skip=2&limit=2",
                "/surveys?skip=4&limit=2",
            ]
        );
    }

    #[tokio::test]
    async fn test_exact_multiple_ends_on_empty_page() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_surveys(Ok(vec![SurveyRecord::new(1), SurveyRecord::new(2)]))
                .with_surveys(Ok(vec![])),
        );
        let use_case = LoadSurveysUseCase::new(gateway.clone()).with_page_limit(2);

        let records = use_case.execute(&LoadSurveysInput::all()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_later_page_fails_whole_listing() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_surveys(Ok(vec![SurveyRecord::new(1), SurveyRecord::new(2)]))
                .with_surveys(Err(GatewayError::Network("reset".to_string()))),
        );
        let use_case = LoadSurveysUseCase::new(gateway).with_page_limit(2);

        let err = use_case.execute(&LoadSurveysInput::all()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
    }

    #[tokio::test]
    async fn test_explicit_limit_fetches_one_window() {
        let gateway = Arc::new(
            MockGateway::new().with_surveys(Ok(vec![SurveyRecord::new(1), SurveyRecord::new(2)])),
        );
        let use_case = LoadSurveysUseCase::new(gateway.clone()).with_page_limit(2);
        let input = LoadSurveysInput {
            sentiment: None,
            filter: SurveyFilter::default().with_limit(2),
        };

        let records = use_case.execute(&input).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(gateway.survey_requests(), vec!["/surveys?limit=2"]);
    }

    #[tokio::test]
    async fn test_sentiment_uses_path_segment() {
        let gateway = Arc::new(MockGateway::new().with_surveys(Ok(vec![])));
        let use_case = LoadSurveysUseCase::new(gateway.clone());

        let records = use_case
            .execute(&LoadSurveysInput::with_sentiment(Some(Sentiment::Negative)))
            .await
            .unwrap();
        assert!(records.is_empty());
        assert_eq!(gateway.survey_requests(), vec!["/surveys/Negative"]);
    }

    #[tokio::test]
    async fn test_failure_is_returned() {
        let gateway = Arc::new(MockGateway::new().with_surveys(Err(GatewayError::Server {
            status: 500,
            message: String::new(),
        })));
        let use_case = LoadSurveysUseCase::new(gateway);

        let err = use_case.execute(&LoadSurveysInput::all()).await.unwrap_err();
        assert_eq!(
            err.user_message(FETCH_FAILED_MESSAGE),
            "Failed to fetch data (HTTP 500)"
        );
    }
}
