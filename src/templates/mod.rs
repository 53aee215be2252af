pub mod system_vms_page_template;
pub mod confirmation_template;

pub use system_vms_page_template::SystemVmsPageTemplate;
pub use confirmation_template::ConfirmationTemplate;
