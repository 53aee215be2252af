pub mod job_service;
pub mod system_vm_service;

// Re-export commonly used functions
pub use job_service::wait_for_job;
pub use system_vm_service::{dispatch_action, load_panel, load_rows, panel_for, run_action, ActionOutcome};
