//! Visualize Question use case
//!
//! Fetches the aggregate for one question and turns it into a chart.

use crate::ports::progress::{NoProgress, Operation, ProgressNotifier};
use crate::ports::survey_gateway::{GatewayError, SurveyGateway};
use crate::store::ChartPanel;
use crate::use_cases::shared::with_deadline;
use std::sync::Arc;
use std::time::Duration;
use survey_domain::{GroupBy, QuestionId, build_chart};
use tracing::{debug, info, warn};

/// Use case for charting a single question
pub struct VisualizeQuestionUseCase<G: SurveyGateway + 'static> {
    gateway: Arc<G>,
    timeout: Option<Duration>,
}

impl<G: SurveyGateway + 'static> VisualizeQuestionUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn execute(
        &self,
        question: QuestionId,
        group_by: Option<GroupBy>,
    ) -> Result<ChartPanel, GatewayError> {
        self.execute_with_progress(question, group_by, &NoProgress)
            .await
    }

    /// Fetch and chart `question`.
    ///
    /// Only transport and status failures are errors. A body the chart
    /// builder cannot interpret still yields a panel, with an unsupported
    /// view-model and the raw response attached.
    pub async fn execute_with_progress(
        &self,
        question: QuestionId,
        group_by: Option<GroupBy>,
        progress: &dyn ProgressNotifier,
    ) -> Result<ChartPanel, GatewayError> {
        debug!(
            "Fetching {} grouped by {}",
            question,
            group_by.map(|g| g.as_str()).unwrap_or("nothing")
        );
        progress.on_request_start(Operation::FetchQuestion);
        let result = with_deadline(
            self.timeout,
            self.gateway.question_aggregate(question, group_by),
        )
        .await;
        progress.on_request_complete(Operation::FetchQuestion, result.is_ok());

        let raw = result.inspect_err(|e| warn!("Fetching {} failed: {}", question, e))?;
        let view_model = build_chart(question.as_str(), question.is_rating(), group_by, &raw);
        match &view_model.reason {
            Some(reason) => info!("No chart for {}: {}", question, reason),
            None => info!("Charted {} ({} points)", question, view_model.points.len()),
        }

        Ok(ChartPanel {
            question,
            group_by,
            view_model,
            raw,
        })
    }
}
