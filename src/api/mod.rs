// Management server API modules
pub mod client;
pub mod error;
pub mod system_vms;
pub mod async_jobs;

// Re-export commonly used functions
pub use client::{api_call, set_silent};
pub use error::ApiError;
pub use system_vms::{
    list_system_vms, get_system_vm, submit_system_vm_action, parse_system_vm_list, SystemVmFilter,
};
pub use async_jobs::{query_async_job_result, parse_job_status, system_vm_from_job_result, JobStatus};
