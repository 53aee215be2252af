use crate::models::state_badge::StateBadge;
use crate::models::system_vm::SystemVm;
use crate::utils::{fromdb, truncate_chars};

/// Longest name shown in a list row.
pub const ROW_NAME_LIMIT: usize = 25;
pub const SYSTEM_VM_ICON: &str = "/static/systemvm.svg";

/// Summary row of the list panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemVmRow {
    pub id: String,
    pub dom_id: String,
    pub detail_url: String,
    pub icon: &'static str,
    pub first_row: String,
    pub second_row: String,
    pub state_badge: StateBadge,
}

impl SystemVmRow {
    pub fn from_record(vm: &SystemVm) -> Self {
        Self {
            id: vm.id.clone(),
            dom_id: row_dom_id(&vm.id),
            detail_url: detail_url(&vm.id),
            icon: SYSTEM_VM_ICON,
            first_row: truncate_chars(&fromdb(&vm.name), ROW_NAME_LIMIT),
            second_row: fromdb(vm.publicip.as_deref().unwrap_or_default()),
            state_badge: StateBadge::for_state(&vm.state),
        }
    }
}

pub fn row_dom_id(id: &str) -> String {
    format!("systemvm-row-{}", id)
}

/// Path of the details page, with the id percent-encoded as one segment.
pub fn detail_url(id: &str) -> String {
    format!("/systemvms/{}", urlencoding::encode(id))
}
