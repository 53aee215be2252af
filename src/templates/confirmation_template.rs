use askama::Template;
use crate::models::SystemVmRow;

#[derive(Template)]
#[template(path = "confirm.html")]
pub struct ConfirmationTemplate<'a> {
    pub api_hostname: String,
    pub flash_messages: Vec<String>,
    pub error_messages: Vec<String>,

    pub title: &'static str,
    pub message: &'static str,
    pub row: &'a SystemVmRow,
    pub target_url: String,
    pub cancel_url: String,
    pub in_process_text: &'static str,
    pub button_class: &'static str,
}
