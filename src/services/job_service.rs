use serde_json::Value;

use crate::api::{query_async_job_result, ApiError, JobStatus};
use crate::models::AppState;

/// Poll an async job until it leaves the pending state.
///
/// `on_poll` is called with the 1-based attempt number before each query.
/// Returns the full result envelope on success.
pub async fn wait_for_job<F>(state: &AppState, job_id: &str, mut on_poll: F) -> Result<Value, ApiError>
where
    F: FnMut(u32),
{
    let settings = state.job_poll;
    for attempt in 1..=settings.max_polls {
        on_poll(attempt);
        match query_async_job_result(state, job_id).await? {
            JobStatus::Succeeded(envelope) => {
                tracing::info!(job_id, attempt, "Async job succeeded");
                return Ok(envelope);
            }
            JobStatus::Failed { code, text } => {
                tracing::warn!(job_id, code, %text, "Async job failed");
                return Err(ApiError::JobFailed { job_id: job_id.to_string(), code, text });
            }
            JobStatus::Pending => {
                tracing::debug!(job_id, attempt, "Async job pending");
                if attempt < settings.max_polls {
                    tokio::time::sleep(settings.interval).await;
                }
            }
        }
    }
    Err(ApiError::JobTimedOut {
        job_id: job_id.to_string(),
        polls: settings.max_polls,
    })
}
