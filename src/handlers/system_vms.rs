use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::api::SystemVmFilter;
use crate::models::{AppState, Confirmation, SystemVmAction};
use crate::services::{load_panel, load_rows, run_action, ActionOutcome};
use crate::templates::ConfirmationTemplate;
use super::helpers::{
    build_template_globals, detail_url, not_found, render_systemvms_page, render_template,
    sync_panel_row,
};

#[derive(Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub decision: String,
}

pub async fn root_get() -> impl IntoResponse {
    Redirect::to("/systemvms")
}

pub async fn systemvms_list(
    State(state): State<AppState>,
    Query(filter): Query<SystemVmFilter>,
) -> Response {
    let mut errors = Vec::new();
    let rows = load_rows(&state, &filter).await.unwrap_or_else(|e| {
        tracing::error!(%e, "Failed to list system VMs");
        errors.push(e.to_string());
        Vec::new()
    });
    render_systemvms_page(&rows, None, &filter, build_template_globals(&state, Vec::new(), errors))
}

pub async fn systemvm_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(filter): Query<SystemVmFilter>,
) -> Response {
    let mut errors = Vec::new();
    let rows = load_rows(&state, &filter).await.unwrap_or_else(|e| {
        tracing::error!(%e, "Failed to list system VMs");
        errors.push(e.to_string());
        Vec::new()
    });
    let panel = match load_panel(&state, &id).await {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::error!(%e, id = %id, "Failed to load system VM");
            errors.push(e.to_string());
            None
        }
    };
    render_systemvms_page(&rows, panel.as_ref(), &filter, build_template_globals(&state, Vec::new(), errors))
}

pub async fn systemvm_confirm_get(
    State(state): State<AppState>,
    Path((id, action)): Path<(String, String)>,
) -> Response {
    let Some(action) = SystemVmAction::from_str(&action) else {
        return not_found();
    };
    let panel = match load_panel(&state, &id).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(%e, id = %id, "Failed to load system VM");
            let globals = build_template_globals(&state, Vec::new(), vec![e.to_string()]);
            return render_systemvms_page(&[], None, &SystemVmFilter::default(), globals);
        }
    };
    if !panel.details.offers(action) {
        let message = format!("{} is not available while the system VM is {}.", action.label(), panel.record.state);
        let rows = load_rows(&state, &SystemVmFilter::default()).await.unwrap_or_default();
        let globals = build_template_globals(&state, Vec::new(), vec![message]);
        return render_systemvms_page(&rows, Some(&panel), &SystemVmFilter::default(), globals);
    }
    let globals = build_template_globals(&state, Vec::new(), Vec::new());
    render_template(ConfirmationTemplate {
        api_hostname: globals.api_hostname,
        flash_messages: globals.flash_messages,
        error_messages: globals.error_messages,
        title: action.label(),
        message: action.confirm_message(),
        row: &panel.row,
        target_url: format!("{}/{}", detail_url(&id), action.to_str()),
        cancel_url: detail_url(&id),
        in_process_text: action.in_process_text(),
        button_class: match action {
            SystemVmAction::Start => "btn-primary",
            SystemVmAction::Stop | SystemVmAction::Reboot => "btn-danger",
        },
    })
}

pub async fn systemvm_action_post(
    State(state): State<AppState>,
    Path((id, action)): Path<(String, String)>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let Some(action) = SystemVmAction::from_str(&action) else {
        return not_found();
    };
    let decision = Confirmation::from_form(&form.decision);
    let mut panel = match load_panel(&state, &id).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(%e, id = %id, "Failed to load system VM");
            let globals = build_template_globals(&state, Vec::new(), vec![e.to_string()]);
            return render_systemvms_page(&[], None, &SystemVmFilter::default(), globals);
        }
    };

    let mut flashes = Vec::new();
    let mut errors = Vec::new();
    let outcome = run_action(&state, action, &mut panel, decision, |attempt| {
        tracing::debug!(id = %id, attempt, "{}", action.in_process_text());
    })
    .await;
    match outcome {
        Ok(ActionOutcome::Completed) => flashes.push(format!("{}.", action.done_text())),
        Ok(ActionOutcome::Cancelled) => return Redirect::to(&detail_url(&id)).into_response(),
        Ok(ActionOutcome::NotOffered) => errors.push(format!(
            "{} is not available while the system VM is {}.",
            action.label(),
            panel.record.state
        )),
        Err(e) => {
            tracing::error!(%e, id = %id, action = action.to_str(), "System VM action failed");
            errors.push(e.to_string());
        }
    }

    let filter = SystemVmFilter::default();
    let mut rows = load_rows(&state, &filter).await.unwrap_or_else(|e| {
        tracing::error!(%e, "Failed to list system VMs");
        errors.push(e.to_string());
        Vec::new()
    });
    sync_panel_row(&mut rows, &panel);
    render_systemvms_page(&rows, Some(&panel), &filter, build_template_globals(&state, flashes, errors))
}
