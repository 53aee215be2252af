use crate::api::{self, ApiError, SystemVmFilter};
use crate::models::{AppState, Confirmation, SystemVm, SystemVmAction, SystemVmPanel, SystemVmRow};
use crate::services::job_service::wait_for_job;

/// What happened to a requested lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The job finished and the panel now shows the returned record.
    Completed,
    /// The user declined at the confirmation step; nothing was sent.
    Cancelled,
    /// The current state does not offer this action; nothing was sent.
    NotOffered,
}

pub fn panel_for(state: &AppState, record: SystemVm) -> SystemVmPanel {
    SystemVmPanel::new(record, state.console_base_url.clone())
}

pub async fn load_rows(state: &AppState, filter: &SystemVmFilter) -> Result<Vec<SystemVmRow>, ApiError> {
    let vms = api::list_system_vms(state, filter).await?;
    Ok(vms.iter().map(SystemVmRow::from_record).collect())
}

pub async fn load_panel(state: &AppState, id: &str) -> Result<SystemVmPanel, ApiError> {
    let record = api::get_system_vm(state, id).await?;
    Ok(panel_for(state, record))
}

/// Submit `action` for VM `id`, wait for the job and return the record it reports.
pub async fn dispatch_action<F>(
    state: &AppState,
    action: SystemVmAction,
    id: &str,
    on_poll: F,
) -> Result<SystemVm, ApiError>
where
    F: FnMut(u32),
{
    let job_id = api::submit_system_vm_action(state, action, id).await?;
    tracing::info!(id, job_id = %job_id, action = action.to_str(), "{}", action.in_process_text());
    let envelope = wait_for_job(state, &job_id, on_poll).await?;
    api::system_vm_from_job_result(&envelope)
}

/// Run a confirmed lifecycle action and refresh the panel from the job result.
pub async fn run_action<F>(
    state: &AppState,
    action: SystemVmAction,
    panel: &mut SystemVmPanel,
    decision: Confirmation,
    on_poll: F,
) -> Result<ActionOutcome, ApiError>
where
    F: FnMut(u32),
{
    if decision == Confirmation::Cancel {
        tracing::debug!(id = %panel.record.id, action = action.to_str(), "Action cancelled");
        return Ok(ActionOutcome::Cancelled);
    }
    if !panel.details.offers(action) {
        tracing::warn!(
            id = %panel.record.id,
            action = action.to_str(),
            state = %panel.record.state,
            "Action not offered in current state"
        );
        return Ok(ActionOutcome::NotOffered);
    }
    let id = panel.record.id.clone();
    let updated = dispatch_action(state, action, &id, on_poll).await?;
    panel.refresh(updated);
    Ok(ActionOutcome::Completed)
}
