//! reqwest-backed survey gateway
//!
//! One attempt per call. Non-2xx responses become [`GatewayError::Server`]
//! carrying the backend's `detail` when it sent one.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use survey_application::{GatewayError, SurveyFilter, SurveyGateway, UploadReceipt};
use survey_domain::{GroupBy, QuestionId, Sentiment, SurveyRecord};
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("survey-dashboard/", env!("CARGO_PKG_VERSION"));

/// `GET /surveys` answers either with `{items: [...]}` or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum SurveyList {
    Wrapped { items: Vec<SurveyRecord> },
    Bare(Vec<SurveyRecord>),
}

impl SurveyList {
    fn into_records(self) -> Vec<SurveyRecord> {
        match self {
            SurveyList::Wrapped { items } => items,
            SurveyList::Bare(items) => items,
        }
    }
}

/// HTTP adapter for the survey backend
pub struct HttpSurveyGateway {
    client: Client,
    base_url: String,
}

impl HttpSurveyGateway {
    /// Create a gateway for `base_url`, optionally bounding every request
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        debug!("GET {} {:?}", path, query);
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(network_error)?;
        decode(path, response).await
    }
}

fn network_error(e: reqwest::Error) -> GatewayError {
    warn!("Request did not complete: {}", e);
    GatewayError::Network(e.to_string())
}

/// Turn a response into `T`, or a tagged failure
async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    let body = response.bytes().await.map_err(network_error)?;

    if !status.is_success() {
        let message = error_detail(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
        warn!("{} answered {}: {}", path, status.as_u16(), message);
        return Err(GatewayError::Server {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|e| {
        warn!("{} returned an unexpected body: {}", path, e);
        GatewayError::InvalidResponse(format!("{}: {}", path, e))
    })
}

/// The `detail` field of an error body, if it has one
fn error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null => None,
        // Validation errors arrive as structured lists
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl SurveyGateway for HttpSurveyGateway {
    async fn upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadReceipt, GatewayError> {
        let size = contents.len();
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let form = Form::new().part("file", part);

        debug!("POST /upload {} ({} bytes)", file_name, size);
        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;

        let receipt: UploadReceipt = decode("/upload", response).await?;
        info!(
            "Upload of {} accepted ({} rows returned)",
            file_name,
            receipt.surveys.as_ref().map_or(0, Vec::len)
        );
        Ok(receipt)
    }

    async fn list_surveys(&self, filter: &SurveyFilter) -> Result<Vec<SurveyRecord>, GatewayError> {
        let list: SurveyList = self.get_json("/surveys", &filter.query_pairs()).await?;
        Ok(list.into_records())
    }

    async fn surveys_by_sentiment(
        &self,
        sentiment: Sentiment,
    ) -> Result<Vec<SurveyRecord>, GatewayError> {
        let path = format!("/surveys/{}", sentiment.as_str());
        let list: SurveyList = self.get_json(&path, &[]).await?;
        Ok(list.into_records())
    }

    async fn question_aggregate(
        &self,
        question: QuestionId,
        group_by: Option<GroupBy>,
    ) -> Result<Value, GatewayError> {
        let path = format!("/questions/{}", question.as_str());
        let query: Vec<(&str, String)> = group_by
            .map(|g| vec![("group_by", g.as_str().to_string())])
            .unwrap_or_default();
        self.get_json(&path, &query).await
    }
}
