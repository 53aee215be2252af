use crate::models::system_vm::SystemVm;
use crate::models::system_vm_details::SystemVmDetails;
use crate::models::system_vm_row::SystemVmRow;

/// A record together with the two views rendered from it. Passed explicitly
/// through rendering and action dispatch so both views refresh together.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemVmPanel {
    pub record: SystemVm,
    pub row: SystemVmRow,
    pub details: SystemVmDetails,
    console_base_url: Option<String>,
}

impl SystemVmPanel {
    pub fn new(record: SystemVm, console_base_url: Option<String>) -> Self {
        let row = SystemVmRow::from_record(&record);
        let details = SystemVmDetails::from_record(&record, console_base_url.as_deref());
        Self {
            record,
            row,
            details,
            console_base_url,
        }
    }

    /// Replace the record and re-render row and details from it.
    pub fn refresh(&mut self, record: SystemVm) {
        self.row = SystemVmRow::from_record(&record);
        self.details = SystemVmDetails::from_record(&record, self.console_base_url.as_deref());
        self.record = record;
    }
}
