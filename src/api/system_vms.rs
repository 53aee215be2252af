use serde::Deserialize;
use serde_json::Value;

use super::client::api_call;
use super::error::ApiError;
use crate::models::{AppState, SystemVm, SystemVmAction};
use crate::utils::value_to_short_string;

/// Optional `listSystemVms` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemVmFilter {
    #[serde(default)]
    pub zoneid: Option<String>,
    #[serde(default)]
    pub systemvmtype: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl SystemVmFilter {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        for (key, value) in [
            ("zoneid", &self.zoneid),
            ("systemvmtype", &self.systemvmtype),
            ("state", &self.state),
        ] {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                params.push((key, v.to_string()));
            }
        }
        params
    }
}

/// Pull the records out of a `listsystemvmsresponse` envelope.
/// An envelope without a `systemvm` array means the list is empty.
pub fn parse_system_vm_list(payload: &Value) -> Result<Vec<SystemVm>, ApiError> {
    let inner = payload
        .get("listsystemvmsresponse")
        .ok_or_else(|| ApiError::MissingField("listsystemvmsresponse".into()))?;
    match inner.get("systemvm") {
        Some(list) => serde_json::from_value(list.clone()).map_err(|e| ApiError::Decode(e.to_string())),
        None => Ok(Vec::new()),
    }
}

pub async fn list_system_vms(state: &AppState, filter: &SystemVmFilter) -> Result<Vec<SystemVm>, ApiError> {
    let payload = api_call(
        &state.client,
        &state.api_base_url,
        &state.session_key,
        "listSystemVms",
        &filter.to_params(),
    )
    .await?;
    parse_system_vm_list(&payload)
}

pub async fn get_system_vm(state: &AppState, id: &str) -> Result<SystemVm, ApiError> {
    let payload = api_call(
        &state.client,
        &state.api_base_url,
        &state.session_key,
        "listSystemVms",
        &[("id", id.to_string())],
    )
    .await?;
    parse_system_vm_list(&payload)?
        .into_iter()
        .find(|vm| vm.id == id)
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

/// Read the job id from the action's submit envelope, e.g. `startsystemvmresponse.jobid`.
pub fn parse_job_id(action: SystemVmAction, payload: &Value) -> Result<String, ApiError> {
    let key = action.async_job_response();
    let job_id = payload
        .get(key)
        .and_then(|inner| inner.get("jobid"))
        .map(value_to_short_string)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::MissingField(format!("{}.jobid", key)))?;
    Ok(job_id)
}

/// Submit a lifecycle command; returns the async job id to poll.
pub async fn submit_system_vm_action(
    state: &AppState,
    action: SystemVmAction,
    id: &str,
) -> Result<String, ApiError> {
    tracing::info!(command = %action.command_query(id), "Submitting system VM action");
    let payload = api_call(
        &state.client,
        &state.api_base_url,
        &state.session_key,
        action.api_command(),
        &[("id", id.to_string())],
    )
    .await?;
    parse_job_id(action, &payload)
}
