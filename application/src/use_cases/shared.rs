//! Shared utilities for use cases.

use crate::ports::survey_gateway::GatewayError;
use std::future::Future;
use std::time::Duration;

/// Run a gateway call, giving up after `timeout` if one is set.
pub(crate) async fn with_deadline<T, F>(
    timeout: Option<Duration>,
    call: F,
) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
            GatewayError::Network(format!("no response within {}s", limit.as_secs()))
        })?,
        None => call.await,
    }
}
