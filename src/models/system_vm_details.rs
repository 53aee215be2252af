use chrono::DateTime;

use crate::models::state_badge::StateBadge;
use crate::models::system_vm::SystemVm;
use crate::models::system_vm_action::SystemVmAction;
use crate::utils::{fromdb, no_null};

const CREATED_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";
const CREATED_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One entry of the details panel's action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLink {
    pub action: SystemVmAction,
    pub label: &'static str,
    pub confirm_url: String,
}

/// Expanded, field-by-field view of a system VM.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemVmDetails {
    pub id: String,
    pub title: String,
    pub state_badge: StateBadge,
    pub ip_address: String,
    pub fields: Vec<(String, String)>,
    pub viewer_sessions_visible: bool,
    pub viewer_sessions: String,
    pub actions: Vec<ActionLink>,
    pub console_url: Option<String>,
}

impl SystemVmDetails {
    pub fn from_record(vm: &SystemVm, console_base_url: Option<&str>) -> Self {
        let text = |v: &Option<String>| fromdb(v.as_deref().unwrap_or_default());

        let fields = vec![
            ("State".to_string(), fromdb(vm.state.as_str())),
            ("System VM Type".to_string(), vm.systemvmtype.display_text().to_string()),
            ("Zone".to_string(), text(&vm.zonename)),
            ("ID".to_string(), fromdb(&vm.id)),
            ("Name".to_string(), fromdb(&vm.name)),
            ("Public IP".to_string(), text(&vm.publicip)),
            ("Private IP".to_string(), text(&vm.privateip)),
            ("Host Name".to_string(), text(&vm.hostname)),
            ("Gateway".to_string(), text(&vm.gateway)),
            ("Created".to_string(), format_created(vm.created.as_deref())),
        ];

        let viewer_sessions_visible = vm.systemvmtype.has_viewer_sessions();
        let viewer_sessions = if viewer_sessions_visible {
            text(&vm.activeviewersessions)
        } else {
            String::new()
        };

        let actions = vm
            .state
            .available_actions()
            .into_iter()
            .map(|action| ActionLink {
                action,
                label: action.label(),
                confirm_url: confirm_url(&vm.id, action),
            })
            .collect();

        let console_url = match (&vm.state, console_base_url) {
            (crate::models::VmState::Running, Some(base)) if !vm.id.is_empty() => Some(format!(
                "{}?cmd=access&vm={}",
                base,
                urlencoding::encode(&vm.id)
            )),
            _ => None,
        };

        Self {
            id: vm.id.clone(),
            title: fromdb(&vm.name),
            state_badge: StateBadge::for_state(&vm.state),
            ip_address: no_null(vm.publicip.as_deref()),
            fields,
            viewer_sessions_visible,
            viewer_sessions,
            actions,
            console_url,
        }
    }

    pub fn offers(&self, action: SystemVmAction) -> bool {
        self.actions.iter().any(|link| link.action == action)
    }

    pub fn action_labels(&self) -> Vec<&'static str> {
        self.actions.iter().map(|link| link.label).collect()
    }
}

pub fn confirm_url(id: &str, action: SystemVmAction) -> String {
    format!("/systemvms/{}/confirm/{}", urlencoding::encode(id), action.to_str())
}

/// Reformat the API timestamp; values that do not parse are shown as sent.
pub fn format_created(raw: Option<&str>) -> String {
    let raw = fromdb(raw.unwrap_or_default());
    match DateTime::parse_from_str(raw.trim(), CREATED_INPUT_FORMAT) {
        Ok(ts) => ts.format(CREATED_DISPLAY_FORMAT).to_string(),
        Err(_) => raw,
    }
}
