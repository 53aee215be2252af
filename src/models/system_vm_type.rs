use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::utils::value_to_short_string;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SystemVmType {
    ConsoleProxy,
    SecondaryStorageVm,
    #[default]
    Unknown,
    Other(String),
}

impl SystemVmType {
    pub fn from_str(s: &str) -> Self {
        match s {
            "consoleproxy" => Self::ConsoleProxy,
            "secondarystoragevm" => Self::SecondaryStorageVm,
            "" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ConsoleProxy => "consoleproxy",
            Self::SecondaryStorageVm => "secondarystoragevm",
            Self::Unknown => "",
            Self::Other(s) => s,
        }
    }

    /// Human readable type; blank for types the console does not know.
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::ConsoleProxy => "Console Proxy VM",
            Self::SecondaryStorageVm => "Secondary Storage VM",
            Self::Unknown | Self::Other(_) => "",
        }
    }

    pub fn has_viewer_sessions(&self) -> bool {
        matches!(self, Self::ConsoleProxy)
    }
}

impl<'de> Deserialize<'de> for SystemVmType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(SystemVmType::from_str(&value_to_short_string(&raw)))
    }
}
