use serde::{Deserialize, Serialize};
use std::fmt;

/// Dirty/clean flag of a locally cached row. Every local mutation resets
/// it to `Unsynced`; only a confirmed remote acknowledgment sets `Synced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Unsynced,
    Synced,
}

impl SyncStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SyncStatus::Unsynced => "unsynced",
            SyncStatus::Synced => "synced",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unsynced" => Ok(SyncStatus::Unsynced),
            "synced" => Ok(SyncStatus::Synced),
            other => Err(format!("Unknown sync status: {other}")),
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, SyncStatus::Synced)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
