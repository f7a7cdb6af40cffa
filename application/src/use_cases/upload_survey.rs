//! Upload Survey use case
//!
//! Validates the selected file, reads it and sends it to the backend.

use crate::ports::progress::{NoProgress, Operation, ProgressNotifier};
use crate::ports::survey_gateway::{GatewayError, SurveyGateway, UploadReceipt};
use crate::use_cases::shared::with_deadline;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use survey_domain::{CsvUpload, ValidationError};
use thiserror::Error;
use tracing::{info, warn};

/// Shown when the backend gives no reason for a failed upload
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload file";

/// Errors that can occur during an upload
#[derive(Error, Debug)]
pub enum UploadSurveyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl UploadSurveyError {
    /// Message for the inline notice
    pub fn user_message(&self) -> String {
        match self {
            UploadSurveyError::Gateway(e) => e.user_message(UPLOAD_FAILED_MESSAGE),
            other => other.to_string(),
        }
    }

    /// Whether the upload was rejected before anything was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, UploadSurveyError::Validation(_))
    }
}

/// Use case for uploading a survey CSV
pub struct UploadSurveyUseCase<G: SurveyGateway + 'static> {
    gateway: Arc<G>,
    timeout: Option<Duration>,
}

impl<G: SurveyGateway + 'static> UploadSurveyUseCase<G> {
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

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, path: Option<&Path>) -> Result<UploadReceipt, UploadSurveyError> {
        self.execute_with_progress(path, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        path: Option<&Path>,
        progress: &dyn ProgressNotifier,
    ) -> Result<UploadReceipt, UploadSurveyError> {
        // Rejected selections never reach the network
        let upload = CsvUpload::select(path)?;
        self.send_with_progress(&upload, progress).await
    }

    /// Read and send an already validated upload
    pub async fn send_with_progress(
        &self,
        upload: &CsvUpload,
        progress: &dyn ProgressNotifier,
    ) -> Result<UploadReceipt, UploadSurveyError> {
        let contents =
            tokio::fs::read(upload.path())
                .await
                .map_err(|source| UploadSurveyError::Read {
                    path: upload.path().to_path_buf(),
                    source,
                })?;

        info!(
            "Uploading {} ({} bytes)",
            upload.file_name(),
            contents.len()
        );
        progress.on_request_start(Operation::Upload);

        let result = with_deadline(
            self.timeout,
            self.gateway.upload(upload.file_name(), contents),
        )
        .await;
        progress.on_request_complete(Operation::Upload, result.is_ok());

        match result {
            Ok(receipt) => {
                info!(
                    "Upload accepted: {}",
                    receipt.detail.as_deref().unwrap_or("no detail")
                );
                Ok(receipt)
            }
            Err(e) => {
                warn!("Upload failed: {}", e);
                Err(e.into())
            }
        }
    }
}
