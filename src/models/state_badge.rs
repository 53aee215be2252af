use crate::models::vm_state::VmState;

/// Coloured state indicator shared by the list row and the details panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateBadge {
    pub label: String,
    pub css_class: &'static str,
}

impl StateBadge {
    pub fn for_state(state: &VmState) -> Self {
        let css_class = match state {
            VmState::Running => "status-green",
            VmState::Stopped => "status-red",
            _ => "status-gray",
        };
        Self {
            label: crate::utils::fromdb(state.as_str()),
            css_class,
        }
    }
}
