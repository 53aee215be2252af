use serde_json::Value;

use super::client::api_call;
use super::error::ApiError;
use crate::models::{AppState, SystemVm};
use crate::utils::value_to_short_string;

const JOB_RESULT_ENVELOPE: &str = "queryasyncjobresultresponse";

/// State of an async job as reported by `queryAsyncJobResult`.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Pending,
    /// Carries the whole response envelope; the job result lives inside it.
    Succeeded(Value),
    Failed { code: i64, text: String },
}

pub fn parse_job_status(payload: &Value) -> Result<JobStatus, ApiError> {
    let inner = payload
        .get(JOB_RESULT_ENVELOPE)
        .ok_or_else(|| ApiError::MissingField(JOB_RESULT_ENVELOPE.into()))?;
    let status = inner
        .get("jobstatus")
        .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
        .ok_or_else(|| ApiError::MissingField(format!("{}.jobstatus", JOB_RESULT_ENVELOPE)))?;
    match status {
        0 => Ok(JobStatus::Pending),
        1 => Ok(JobStatus::Succeeded(payload.clone())),
        _ => {
            let code = inner.get("jobresultcode").and_then(|v| v.as_i64()).unwrap_or_default();
            let text = inner
                .get("jobresult")
                .and_then(|r| r.get("errortext"))
                .map(value_to_short_string)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "job failed without an error message".to_string());
            Ok(JobStatus::Failed { code, text })
        }
    }
}

/// The record a lifecycle job returns, at `queryasyncjobresultresponse.jobresult.systemvm`.
pub fn system_vm_from_job_result(payload: &Value) -> Result<SystemVm, ApiError> {
    let record = payload
        .get(JOB_RESULT_ENVELOPE)
        .and_then(|inner| inner.get("jobresult"))
        .and_then(|result| result.get("systemvm"))
        .ok_or_else(|| ApiError::MissingField(format!("{}.jobresult.systemvm", JOB_RESULT_ENVELOPE)))?;
    serde_json::from_value(record.clone()).map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn query_async_job_result(state: &AppState, job_id: &str) -> Result<JobStatus, ApiError> {
    let payload = api_call(
        &state.client,
        &state.api_base_url,
        &state.session_key,
        "queryAsyncJobResult",
        &[("jobid", job_id.to_string())],
    )
    .await?;
    parse_job_status(&payload)
}
