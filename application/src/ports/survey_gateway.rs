//! Survey Gateway port
//!
//! Defines the interface for talking to the survey backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use survey_domain::{GroupBy, QuestionId, Sentiment, SurveyRecord};
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The request never reached the server
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A 2xx body that does not match the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Message to show the user, falling back to `fallback` when the server
    /// did not explain the failure
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::Server { message, .. } if !message.is_empty() => message.clone(),
            GatewayError::Server { status, .. } => format!("{} (HTTP {})", fallback, status),
            GatewayError::Network(detail) | GatewayError::InvalidResponse(detail) => {
                format!("{}: {}", fallback, detail)
            }
        }
    }
}

/// Optional query parameters of `GET /surveys`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurveyFilter {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub gender: Option<String>,
    pub education_level: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub sentiment: Option<Sentiment>,
}

impl SurveyFilter {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Query pairs for the parameters that are set, in a stable order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        let text_params = [
            ("gender", &self.gender),
            ("education_level", &self.education_level),
            ("state", &self.state),
            ("city", &self.city),
        ];
        for (key, value) in text_params {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }
        if let Some(sentiment) = self.sentiment {
            pairs.push(("sentiment", sentiment.as_str().to_string()));
        }
        pairs
    }
}

/// Body of a successful `POST /upload`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub surveys: Option<Vec<SurveyRecord>>,
}

/// Gateway to the survey backend
///
/// This port defines how the application layer reaches the backend.
/// Implementations (adapters) live in the infrastructure layer. Each call is
/// a single attempt: no retries, no caching.
#[async_trait]
pub trait SurveyGateway: Send + Sync {
    /// `POST /upload` with the CSV as multipart field `file`
    async fn upload(&self, file_name: &str, contents: Vec<u8>)
    -> Result<UploadReceipt, GatewayError>;

    /// `GET /surveys`
    async fn list_surveys(&self, filter: &SurveyFilter) -> Result<Vec<SurveyRecord>, GatewayError>;

    /// `GET /surveys/{sentiment}`
    async fn surveys_by_sentiment(
        &self,
        sentiment: Sentiment,
    ) -> Result<Vec<SurveyRecord>, GatewayError>;

    /// `GET /questions/{id}[?group_by=field]`, returned unparsed
    async fn question_aggregate(
        &self,
        question: QuestionId,
        group_by: Option<GroupBy>,
    ) -> Result<Value, GatewayError>;
}
