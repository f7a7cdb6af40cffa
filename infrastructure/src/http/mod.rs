//! HTTP adapter for the survey backend

mod gateway;

pub use gateway::HttpSurveyGateway;
