//! Dashboard Controller
//!
//! Keeps the dashboard logic out of the REPL and the one-shot commands.
//! Owns the [`DashboardState`], runs the use cases and turns their outcomes
//! into state actions. Failures never escape as errors; they become notices.

use crate::config::BehaviorConfig;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::survey_gateway::SurveyGateway;
use crate::store::{DashboardAction, DashboardState, RequestChannel};
use crate::use_cases::load_surveys::{FETCH_FAILED_MESSAGE, LoadSurveysInput, LoadSurveysUseCase};
use crate::use_cases::upload_survey::UploadSurveyUseCase;
use crate::use_cases::visualize_question::VisualizeQuestionUseCase;
use std::path::Path;
use std::sync::Arc;
use survey_domain::{ChartViewModel, CsvUpload, GroupBy, QuestionId, Sentiment};
use tracing::debug;

/// Controller driving a [`DashboardState`] against a [`SurveyGateway`]
pub struct DashboardController<G: SurveyGateway + 'static> {
    upload_use_case: UploadSurveyUseCase<G>,
    load_use_case: LoadSurveysUseCase<G>,
    visualize_use_case: VisualizeQuestionUseCase<G>,
    progress: Arc<dyn ProgressNotifier>,
    state: DashboardState,
}

impl<G: SurveyGateway + 'static> DashboardController<G> {
    pub fn new(gateway: Arc<G>, config: BehaviorConfig) -> Self {
        Self {
            upload_use_case: UploadSurveyUseCase::new(gateway.clone()).with_timeout(config.timeout),
            load_use_case: LoadSurveysUseCase::new(gateway.clone()).with_timeout(config.timeout),
            visualize_use_case: VisualizeQuestionUseCase::new(gateway)
                .with_timeout(config.timeout),
            progress: Arc::new(NoProgress),
            state: DashboardState::new().with_page_size(config.page_size),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Apply a purely local action (selection, table view, notice)
    pub fn dispatch(&mut self, action: DashboardAction) -> bool {
        self.state.apply(action)
    }

    /// Upload a CSV, then make sure the table has rows to show.
    ///
    /// Returns whether the upload itself succeeded. A rejected selection
    /// never starts a request.
    pub async fn upload(&mut self, path: Option<&Path>) -> bool {
        let upload = match CsvUpload::select(path) {
            Ok(upload) => upload,
            Err(e) => {
                debug!("Upload rejected locally: {}", e);
                self.state
                    .apply(DashboardAction::ValidationFailed(e.to_string()));
                return false;
            }
        };

        let ticket = self.state.begin_request(RequestChannel::Upload);
        let result = self
            .upload_use_case
            .send_with_progress(&upload, self.progress.as_ref())
            .await;

        match result {
            Ok(receipt) => {
                let needs_refresh = receipt.surveys.is_none();
                self.state.apply(DashboardAction::UploadSucceeded {
                    ticket,
                    message: receipt.detail,
                    surveys: receipt.surveys,
                });
                if needs_refresh {
                    // Keep the success notice visible over the refresh
                    let notice = self.state.notice().cloned();
                    self.refresh_surveys().await;
                    if self.state.notice().is_none()
                        && let Some(notice) = notice
                    {
                        self.state.restore_notice(notice);
                    }
                }
                true
            }
            Err(e) => {
                self.state.apply(DashboardAction::RequestFailed {
                    ticket,
                    message: e.user_message(),
                });
                false
            }
        }
    }

    /// Reload the table, honoring the current sentiment filter
    pub async fn refresh_surveys(&mut self) -> bool {
        let ticket = self.state.begin_request(RequestChannel::Surveys);
        let input = LoadSurveysInput::with_sentiment(self.state.sentiment_filter());
        let result = self
            .load_use_case
            .execute_with_progress(&input, self.progress.as_ref())
            .await;

        match result {
            Ok(records) => {
                self.state
                    .apply(DashboardAction::SurveysLoaded { ticket, records });
                true
            }
            Err(e) => {
                self.state.apply(DashboardAction::RequestFailed {
                    ticket,
                    message: e.user_message(FETCH_FAILED_MESSAGE),
                });
                false
            }
        }
    }

    /// Change the sentiment filter and reload the table
    pub async fn set_sentiment_filter(&mut self, sentiment: Option<Sentiment>) -> bool {
        self.state
            .apply(DashboardAction::SetSentimentFilter(sentiment));
        self.refresh_surveys().await
    }

    pub fn select_question(&mut self, question: QuestionId) {
        self.state.apply(DashboardAction::SelectQuestion(question));
    }

    pub fn select_group_by(&mut self, group_by: Option<GroupBy>) {
        self.state.apply(DashboardAction::SelectGroupBy(group_by));
    }

    /// Fetch and chart the selected question with the selected grouping
    pub async fn visualize(&mut self) -> bool {
        let question = self.state.question();
        let group_by = self.state.group_by();
        let ticket = self.state.begin_request(RequestChannel::Chart);
        let result = self
            .visualize_use_case
            .execute_with_progress(question, group_by, self.progress.as_ref())
            .await;

        match result {
            Ok(panel) => {
                self.state
                    .apply(DashboardAction::ChartLoaded { ticket, panel });
                true
            }
            Err(e) => {
                self.state.apply(DashboardAction::RequestFailed {
                    ticket,
                    message: e.user_message(FETCH_FAILED_MESSAGE),
                });
                false
            }
        }
    }

    pub fn sentiment_summary(&self) -> ChartViewModel {
        self.state.sentiment_summary()
    }

    pub fn dismiss_notice(&mut self) {
        self.state.apply(DashboardAction::DismissNotice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::survey_gateway::{GatewayError, UploadReceipt};
    use crate::use_cases::test_support::MockGateway;
    use serde_json::json;
    use survey_domain::{ChartKind, SurveyRecord};

    fn controller(gateway: MockGateway) -> (Arc<MockGateway>, DashboardController<MockGateway>) {
        let gateway = Arc::new(gateway);
        let controller = DashboardController::new(gateway.clone(), BehaviorConfig::default());
        (gateway, controller)
    }

    fn csv_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("survey.csv");
        std::fs::write(&path, "id,age\n1,30\n").unwrap();
        path
    }

    #[tokio::test]
    async fn test_invalid_file_sets_error_without_request() {
        let (gateway, mut controller) = controller(MockGateway::new());

        assert!(!controller.upload(Some(Path::new("notes.txt"))).await);
        let notice = controller.state().notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message, "Only CSV files are allowed");
        assert!(!controller.state().is_loading());
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_upload_issues_no_ticket() {
        let (gateway, mut controller) = controller(MockGateway::new());

        assert!(!controller.upload(Some(Path::new("notes.txt"))).await);
        assert!(!controller.upload(None).await);
        assert_eq!(
            controller.state().notice().unwrap().message,
            "Please select a file first"
        );
        assert_eq!(controller.state().requests_started(RequestChannel::Upload), 0);
        assert_eq!(gateway.call_count(), 0);

        let dir = tempfile::tempdir().unwrap();
        controller.upload(Some(&csv_file(&dir))).await;
        assert_eq!(controller.state().requests_started(RequestChannel::Upload), 1);
    }

    #[tokio::test]
    async fn test_upload_deadline_from_config() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_upload_delay(std::time::Duration::from_secs(5))
                .with_upload(Ok(UploadReceipt::default())),
        );
        let config = BehaviorConfig {
            timeout: Some(std::time::Duration::from_millis(20)),
            ..BehaviorConfig::default()
        };
        let mut controller = DashboardController::new(gateway, config);
        let dir = tempfile::tempdir().unwrap();

        assert!(!controller.upload(Some(&csv_file(&dir))).await);
        assert!(!controller.state().is_loading());
        assert!(
            controller
                .state()
                .notice()
                .unwrap()
                .message
                .starts_with("Failed to upload file")
        );
    }

    #[tokio::test]
    async fn test_upload_without_rows_refreshes_table() {
        let (gateway, mut controller) = controller(
            MockGateway::new()
                .with_upload(Ok(UploadReceipt {
                    detail: Some("Successfully uploaded 2 survey records".to_string()),
                    surveys: None,
                }))
                .with_surveys(Ok(vec![SurveyRecord::new(1), SurveyRecord::new(2)])),
        );
        let dir = tempfile::tempdir().unwrap();

        assert!(controller.upload(Some(&csv_file(&dir))).await);
        let state = controller.state();
        assert!(state.has_data());
        assert_eq!(state.surveys().len(), 2);
        assert_eq!(
            state.notice().unwrap().message,
            "Successfully uploaded 2 survey records"
        );
        assert_eq!(gateway.survey_requests(), vec!["/surveys?skip=0&limit=100"]);
    }

    #[tokio::test]
    async fn test_upload_with_rows_skips_refresh() {
        let (gateway, mut controller) = controller(MockGateway::new().with_upload(Ok(
            UploadReceipt {
                detail: None,
                surveys: Some(vec![SurveyRecord::new(9)]),
            },
        )));
        let dir = tempfile::tempdir().unwrap();

        assert!(controller.upload(Some(&csv_file(&dir))).await);
        assert_eq!(controller.state().surveys()[0].id, 9);
        assert_eq!(controller.state().notice().unwrap().message, "Upload successful!");
        assert!(gateway.survey_requests().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_uses_fallback() {
        let (_, mut controller) = controller(MockGateway::new().with_upload(Err(
            GatewayError::Network("connection refused".to_string()),
        )));
        let dir = tempfile::tempdir().unwrap();

        assert!(!controller.upload(Some(&csv_file(&dir))).await);
        let notice = controller.state().notice().unwrap();
        assert!(notice.is_error());
        assert!(notice.message.starts_with("Failed to upload file"));
        assert!(!controller.state().has_data());
    }

    #[tokio::test]
    async fn test_sentiment_filter_reloads_from_sentiment_endpoint() {
        let mut positive = SurveyRecord::new(3);
        positive.sentiment_label = Some(Sentiment::Positive);
        let (gateway, mut controller) =
            controller(MockGateway::new().with_surveys(Ok(vec![positive])));

        assert!(
            controller
                .set_sentiment_filter(Some(Sentiment::Positive))
                .await
        );
        assert_eq!(gateway.survey_requests(), vec!["/surveys/Positive"]);
        assert_eq!(controller.sentiment_summary().values(), vec![1.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_visualize_uses_selection() {
        let (gateway, mut controller) = controller(MockGateway::new().with_question(Ok(json!([
            {"group": "Female", "average": 4.0},
            {"group": null, "average": 2.5}
        ]))));

        controller.select_question(QuestionId::Q2Rating);
        controller.select_group_by(Some(GroupBy::Gender));
        assert!(controller.visualize().await);

        let chart = controller.state().chart().unwrap();
        assert_eq!(chart.view_model.kind, ChartKind::GroupedAverage);
        assert_eq!(chart.view_model.labels(), vec!["Female", "Unknown"]);
        assert_eq!(
            gateway.question_requests(),
            vec![(QuestionId::Q2Rating, Some(GroupBy::Gender))]
        );
    }

    #[tokio::test]
    async fn test_visualize_failure_clears_chart() {
        let (_, mut controller) = controller(
            MockGateway::new()
                .with_question(Ok(json!([{"distribution": {"1": 1}}])))
                .with_question(Err(GatewayError::Server {
                    status: 404,
                    message: "Question not found".to_string(),
                })),
        );

        assert!(controller.visualize().await);
        assert!(controller.state().chart().is_some());
        assert!(!controller.visualize().await);
        assert!(controller.state().chart().is_none());
        assert_eq!(
            controller.state().notice().unwrap().message,
            "Question not found"
        );

        controller.dismiss_notice();
        assert!(controller.state().notice().is_none());
    }
}
