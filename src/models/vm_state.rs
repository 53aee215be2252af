use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::system_vm_action::SystemVmAction;
use crate::utils::value_to_short_string;

/// Lifecycle state of a system VM as reported by the management server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VmState {
    Starting,
    Running,
    Stopping,
    Stopped,
    Migrating,
    Destroyed,
    Expunging,
    Error,
    /// State missing or empty in the record.
    #[default]
    Unknown,
    /// Any other value the server sends, kept verbatim.
    Other(String),
}

impl VmState {
    /// Exact, case-sensitive match on the API value.
    pub fn from_str(s: &str) -> Self {
        match s {
            "Starting" => Self::Starting,
            "Running" => Self::Running,
            "Stopping" => Self::Stopping,
            "Stopped" => Self::Stopped,
            "Migrating" => Self::Migrating,
            "Destroyed" => Self::Destroyed,
            "Expunging" => Self::Expunging,
            "Error" => Self::Error,
            "" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Starting => "Starting",
            Self::Running => "Running",
            Self::Stopping => "Stopping",
            Self::Stopped => "Stopped",
            Self::Migrating => "Migrating",
            Self::Destroyed => "Destroyed",
            Self::Expunging => "Expunging",
            Self::Error => "Error",
            Self::Unknown => "",
            Self::Other(s) => s,
        }
    }

    /// Lifecycle actions the console offers for this state.
    pub fn available_actions(&self) -> Vec<SystemVmAction> {
        match self {
            Self::Running => vec![SystemVmAction::Stop, SystemVmAction::Reboot],
            Self::Stopped => vec![SystemVmAction::Start],
            Self::Starting
            | Self::Stopping
            | Self::Migrating
            | Self::Destroyed
            | Self::Expunging
            | Self::Error
            | Self::Unknown
            | Self::Other(_) => Vec::new(),
        }
    }
}

impl fmt::Display for VmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VmState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(VmState::from_str(&value_to_short_string(&raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_offers_stop_and_reboot() {
        assert_eq!(
            VmState::Running.available_actions(),
            vec![SystemVmAction::Stop, SystemVmAction::Reboot]
        );
    }

    #[test]
    fn stopped_offers_start_only() {
        assert_eq!(VmState::Stopped.available_actions(), vec![SystemVmAction::Start]);
    }

    #[test]
    fn every_other_state_offers_nothing() {
        let others = [
            VmState::Starting,
            VmState::Stopping,
            VmState::Migrating,
            VmState::Destroyed,
            VmState::Expunging,
            VmState::Error,
            VmState::Unknown,
            VmState::Other("Shutdowned".into()),
        ];
        for state in others {
            assert!(state.available_actions().is_empty(), "{state:?} should offer no actions");
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!(VmState::from_str("Running"), VmState::Running);
        assert_eq!(VmState::from_str("running"), VmState::Other("running".into()));
        assert!(VmState::from_str("running").available_actions().is_empty());
    }

    #[test]
    fn as_str_round_trips_unknown_values() {
        assert_eq!(VmState::from_str("Paused").as_str(), "Paused");
        assert_eq!(VmState::from_str("").as_str(), "");
    }
}
