pub mod helpers;
pub mod system_vms;
