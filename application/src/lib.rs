//! Application layer for survey-dashboard
//!
//! This crate contains use cases, port definitions, the dashboard state
//! container and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod store;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    progress::{NoProgress, Operation, ProgressNotifier},
    survey_gateway::{GatewayError, SurveyFilter, SurveyGateway, UploadReceipt},
};
pub use store::{
    ChartPanel, DashboardAction, DashboardState, Notice, NoticeLevel, RequestChannel,
    RequestTicket,
};
pub use use_cases::dashboard_controller::DashboardController;
pub use use_cases::load_surveys::{FETCH_FAILED_MESSAGE, LoadSurveysInput, LoadSurveysUseCase};
pub use use_cases::upload_survey::{UPLOAD_FAILED_MESSAGE, UploadSurveyError, UploadSurveyUseCase};
pub use use_cases::visualize_question::VisualizeQuestionUseCase;
