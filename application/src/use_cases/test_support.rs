//! Scripted gateway shared by use case tests.

use crate::ports::survey_gateway::{GatewayError, SurveyFilter, SurveyGateway, UploadReceipt};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use survey_domain::{GroupBy, QuestionId, Sentiment, SurveyRecord};

/// Records every call and replays queued results in order
#[derive(Default)]
pub(crate) struct MockGateway {
    calls: AtomicUsize,
    upload_results: Mutex<VecDeque<Result<UploadReceipt, GatewayError>>>,
    survey_results: Mutex<VecDeque<Result<Vec<SurveyRecord>, GatewayError>>>,
    question_results: Mutex<VecDeque<Result<Value, GatewayError>>>,
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
    survey_requests: Mutex<Vec<String>>,
    question_requests: Mutex<Vec<(QuestionId, Option<GroupBy>)>>,
    upload_delay: Option<Duration>,
}

impl MockGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_upload(self, result: Result<UploadReceipt, GatewayError>) -> Self {
        self.upload_results.lock().unwrap().push_back(result);
        self
    }

    /// Make every upload take this long before answering
    pub(crate) fn with_upload_delay(mut self, delay: Duration) -> Self {
        self.upload_delay = Some(delay);
        self
    }

    pub(crate) fn with_surveys(self, result: Result<Vec<SurveyRecord>, GatewayError>) -> Self {
        self.survey_results.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn with_question(self, result: Result<Value, GatewayError>) -> Self {
        self.question_results.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.uploads.lock().unwrap().clone()
    }

    /// Endpoints hit by survey listing calls, e.g. `/surveys?skip=0&limit=100`
    /// or `/surveys/Positive`
    pub(crate) fn survey_requests(&self) -> Vec<String> {
        self.survey_requests.lock().unwrap().clone()
    }

    pub(crate) fn question_requests(&self) -> Vec<(QuestionId, Option<GroupBy>)> {
        self.question_requests.lock().unwrap().clone()
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T, GatewayError>>>) -> Result<T, GatewayError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Network("no scripted response".to_string())))
    }
}

#[async_trait]
impl SurveyGateway for MockGateway {
    async fn upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadReceipt, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), contents));
        if let Some(delay) = self.upload_delay {
            tokio::time::sleep(delay).await;
        }
        Self::next(&self.upload_results)
    }

    async fn list_surveys(&self, filter: &SurveyFilter) -> Result<Vec<SurveyRecord>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let query: Vec<String> = filter
            .query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        let endpoint = if query.is_empty() {
            "/surveys".to_string()
        } else {
            format!("/surveys?{}", query.join("&"))
        };
        self.survey_requests.lock().unwrap().push(endpoint);
        Self::next(&self.survey_results)
    }

    async fn surveys_by_sentiment(
        &self,
        sentiment: Sentiment,
    ) -> Result<Vec<SurveyRecord>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.survey_requests
            .lock()
            .unwrap()
            .push(format!("/surveys/{}", sentiment));
        Self::next(&self.survey_results)
    }

    async fn question_aggregate(
        &self,
        question: QuestionId,
        group_by: Option<GroupBy>,
    ) -> Result<Value, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.question_requests
            .lock()
            .unwrap()
            .push((question, group_by));
        Self::next(&self.question_results)
    }
}
