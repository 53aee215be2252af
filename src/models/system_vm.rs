use serde::Deserialize;

use crate::models::system_vm_type::SystemVmType;
use crate::models::vm_state::VmState;
use crate::utils::{opt_string_or_number, string_or_number};

/// A system VM as returned by `listSystemVms` and by lifecycle job results.
/// Every field tolerates being absent; missing text renders blank.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SystemVm {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub publicip: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub privateip: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub gateway: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub created: Option<String>,
    #[serde(default)]
    pub state: VmState,
    #[serde(default)]
    pub systemvmtype: SystemVmType,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub zoneid: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub zonename: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub activeviewersessions: Option<String>,
}
