use axum::response::{Html, IntoResponse, Response};
use axum::http::StatusCode;

use crate::api::SystemVmFilter;
use crate::models::{AppState, SystemVmPanel, SystemVmRow};
use crate::templates::SystemVmsPageTemplate;

pub use crate::models::system_vm_row::detail_url;

#[derive(Default)]
pub struct TemplateGlobals {
    pub api_hostname: String,
    pub flash_messages: Vec<String>,
    pub error_messages: Vec<String>,
}

pub fn build_template_globals(state: &AppState, flash_messages: Vec<String>, error_messages: Vec<String>) -> TemplateGlobals {
    TemplateGlobals {
        api_hostname: crate::utils::hostname_from_url(&state.api_base_url),
        flash_messages,
        error_messages,
    }
}

pub fn plain_html<S: AsRef<str>>(s: S) -> Response {
    Html(format!("<!DOCTYPE html><html><body><p>{}</p></body></html>", s.as_ref())).into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, plain_html("Not found")).into_response()
}

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Replace the list row for the panel's VM with the panel's freshly rendered row.
pub fn sync_panel_row(rows: &mut [SystemVmRow], panel: &SystemVmPanel) {
    if let Some(row) = rows.iter_mut().find(|r| r.id == panel.row.id) {
        *row = panel.row.clone();
    }
}

/// Render the list panel, with the details panel when `panel` is given.
pub fn render_systemvms_page(
    rows: &[SystemVmRow],
    panel: Option<&SystemVmPanel>,
    filter: &SystemVmFilter,
    globals: TemplateGlobals,
) -> Response {
    let TemplateGlobals { api_hostname, flash_messages, error_messages } = globals;
    render_template(SystemVmsPageTemplate {
        api_hostname,
        flash_messages,
        error_messages,
        rows,
        selected_id: panel.map(|p| p.record.id.clone()).unwrap_or_default(),
        details: panel.map(|p| &p.details),
        filter_zone: filter.zoneid.clone().unwrap_or_default(),
        filter_type: filter.systemvmtype.clone().unwrap_or_default(),
        filter_state: filter.state.clone().unwrap_or_default(),
    })
}
