pub mod app_state;
pub mod state_badge;
pub mod system_vm;
pub mod system_vm_action;
pub mod system_vm_details;
pub mod system_vm_panel;
pub mod system_vm_row;
pub mod system_vm_type;
pub mod vm_state;

pub use app_state::{AppState, JobPollSettings};
pub use state_badge::StateBadge;
pub use system_vm::SystemVm;
pub use system_vm_action::{Confirmation, SystemVmAction};
pub use system_vm_details::{ActionLink, SystemVmDetails};
pub use system_vm_panel::SystemVmPanel;
pub use system_vm_row::SystemVmRow;
pub use system_vm_type::SystemVmType;
pub use vm_state::VmState;
