use askama::Template;
use crate::models::{SystemVmDetails, SystemVmRow};

/// List panel, plus the details panel when a VM is selected.
#[derive(Template)]
#[template(path = "systemvms.html")]
pub struct SystemVmsPageTemplate<'a> {
    pub api_hostname: String,
    pub flash_messages: Vec<String>,
    pub error_messages: Vec<String>,
    pub rows: &'a [SystemVmRow],
    /// Empty when nothing is selected.
    pub selected_id: String,
    pub details: Option<&'a SystemVmDetails>,
    pub filter_zone: String,
    pub filter_type: String,
    pub filter_state: String,
}
