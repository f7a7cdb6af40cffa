//! Dashboard state
//!
//! Single source of truth for everything the dashboard renders. The state is
//! changed only through [`DashboardState::begin_request`] and
//! [`DashboardState::apply`]; results of superseded requests are dropped.

use super::notice::Notice;
use super::sequence::{RequestChannel, RequestSequencer, RequestTicket};
use serde::Serialize;
use serde_json::Value;
use survey_domain::{
    ChartViewModel, GroupBy, QuestionId, Sentiment, SentimentCounts, SortSpec, SurveyRecord,
    TablePage, TableQuery, sentiment_summary,
};
use tracing::debug;

/// Message shown when an upload succeeds without a server message
pub const DEFAULT_UPLOAD_MESSAGE: &str = "Upload successful!";

/// A rendered question chart together with the response it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    pub question: QuestionId,
    pub group_by: Option<GroupBy>,
    pub view_model: ChartViewModel,
    /// Raw backend response, shown when no chart can be drawn
    pub raw: Value,
}

/// State transitions
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    UploadSucceeded {
        ticket: RequestTicket,
        message: Option<String>,
        surveys: Option<Vec<SurveyRecord>>,
    },
    SurveysLoaded {
        ticket: RequestTicket,
        records: Vec<SurveyRecord>,
    },
    ChartLoaded {
        ticket: RequestTicket,
        panel: ChartPanel,
    },
    RequestFailed {
        ticket: RequestTicket,
        message: String,
    },
    /// Client-side rejection; no request was made
    ValidationFailed(String),
    SelectQuestion(QuestionId),
    SelectGroupBy(Option<GroupBy>),
    SetSentimentFilter(Option<Sentiment>),
    SetTableFilter(Option<String>),
    SortBy(Option<SortSpec>),
    GoToPage(usize),
    NextPage,
    PrevPage,
    DismissNotice,
}

/// Central dashboard state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    surveys: Vec<SurveyRecord>,
    has_data: bool,
    notice: Option<Notice>,
    table: TableQuery,
    question: QuestionId,
    group_by: Option<GroupBy>,
    sentiment_filter: Option<Sentiment>,
    chart: Option<ChartPanel>,
    requests: RequestSequencer,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.table = self.table.with_page_size(page_size);
        self
    }

    // ==================== Accessors ====================

    pub fn surveys(&self) -> &[SurveyRecord] {
        &self.surveys
    }

    /// Whether survey data is available to visualize
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn is_loading(&self) -> bool {
        self.requests.any_pending()
    }

    /// Requests started on `channel` since the dashboard opened
    pub fn requests_started(&self, channel: RequestChannel) -> u64 {
        self.requests.issued(channel)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn table_query(&self) -> &TableQuery {
        &self.table
    }

    pub fn table_page(&self) -> TablePage<'_> {
        self.table.apply(&self.surveys)
    }

    pub fn question(&self) -> QuestionId {
        self.question
    }

    pub fn group_by(&self) -> Option<GroupBy> {
        self.group_by
    }

    pub fn sentiment_filter(&self) -> Option<Sentiment> {
        self.sentiment_filter
    }

    pub fn chart(&self) -> Option<&ChartPanel> {
        self.chart.as_ref()
    }

    /// Sentiment chart over the currently loaded records
    pub fn sentiment_summary(&self) -> ChartViewModel {
        sentiment_summary(&SentimentCounts::from_records(&self.surveys))
    }

    // ==================== Transitions ====================

    /// Start a request on `channel`; clears the previous notice
    pub fn begin_request(&mut self, channel: RequestChannel) -> RequestTicket {
        self.notice = None;
        self.requests.begin(channel)
    }

    /// Apply an action. Returns false if it was a stale result and was dropped.
    pub fn apply(&mut self, action: DashboardAction) -> bool {
        match action {
            DashboardAction::UploadSucceeded {
                ticket,
                message,
                surveys,
            } => {
                if !self.settle(ticket) {
                    return false;
                }
                self.has_data = true;
                self.notice = Some(Notice::success(
                    message.unwrap_or_else(|| DEFAULT_UPLOAD_MESSAGE.to_string()),
                ));
                if let Some(records) = surveys {
                    self.replace_surveys(records);
                }
                // Data changed underneath the chart
                self.chart = None;
            }
            DashboardAction::SurveysLoaded { ticket, records } => {
                if !self.settle(ticket) {
                    return false;
                }
                if !records.is_empty() {
                    self.has_data = true;
                }
                self.replace_surveys(records);
            }
            DashboardAction::ChartLoaded { ticket, panel } => {
                if !self.settle(ticket) {
                    return false;
                }
                self.chart = Some(panel);
            }
            DashboardAction::RequestFailed { ticket, message } => {
                if !self.settle(ticket) {
                    return false;
                }
                if ticket.channel == RequestChannel::Chart {
                    self.chart = None;
                }
                self.notice = Some(Notice::error(message));
            }
            DashboardAction::ValidationFailed(message) => {
                self.notice = Some(Notice::error(message));
            }
            DashboardAction::SelectQuestion(question) => {
                if question != self.question {
                    self.question = question;
                    self.clear_chart();
                }
            }
            DashboardAction::SelectGroupBy(group_by) => {
                if group_by != self.group_by {
                    self.group_by = group_by;
                    self.clear_chart();
                }
            }
            DashboardAction::SetSentimentFilter(sentiment) => {
                self.sentiment_filter = sentiment;
                // Rows of the previous filter must not land afterwards
                self.requests.invalidate(RequestChannel::Surveys);
            }
            DashboardAction::SetTableFilter(filter) => self.table.set_filter(filter),
            DashboardAction::SortBy(sort) => self.table.set_sort(sort),
            DashboardAction::GoToPage(page) => {
                let total = self.table_page().total_pages;
                self.table.page = page.clamp(1, total);
            }
            DashboardAction::NextPage => {
                let (current, total) = self.page_position();
                self.table.page = (current + 1).min(total);
            }
            DashboardAction::PrevPage => {
                let (current, _) = self.page_position();
                self.table.page = current.saturating_sub(1).max(1);
            }
            DashboardAction::DismissNotice => self.notice = None,
        }
        true
    }

    /// Put back a notice cleared by a follow-up request
    pub(crate) fn restore_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn settle(&mut self, ticket: RequestTicket) -> bool {
        let current = self.requests.resolve(ticket);
        if !current {
            debug!(
                "Dropping stale {:?} result (seq {})",
                ticket.channel, ticket.seq
            );
        }
        current
    }

    /// Current (clamped) page and total page count
    fn page_position(&self) -> (usize, usize) {
        let page = self.table_page();
        (page.page, page.total_pages)
    }

    fn replace_surveys(&mut self, records: Vec<SurveyRecord>) {
        self.surveys = records;
        self.table.page = 1;
    }

    fn clear_chart(&mut self) {
        self.chart = None;
        self.requests.invalidate(RequestChannel::Chart);
    }
}
