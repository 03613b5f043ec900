use serde::{Deserialize, Serialize};
use std::fmt;

/// Review state of an application. `Pending` and `Endorsed` are set
/// locally; `Approved` and `Rejected` only ever arrive from the remote
/// system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStatus {
    Pending,
    Endorsed,
    Approved,
    Rejected,
}

impl LifecycleStatus {
    pub fn as_str(&self) -> &str {
        match self {
            LifecycleStatus::Pending => "pending",
            LifecycleStatus::Endorsed => "endorsed",
            LifecycleStatus::Approved => "approved",
            LifecycleStatus::Rejected => "rejected",
        }
    }

    /// Case-insensitive; unknown input is rejected so a malformed remote
    /// payload never lands in the local cache.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(LifecycleStatus::Pending),
            "endorsed" => Ok(LifecycleStatus::Endorsed),
            "approved" => Ok(LifecycleStatus::Approved),
            "rejected" => Ok(LifecycleStatus::Rejected),
            other => Err(format!("Unknown application status: {other}")),
        }
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_any_casing() {
        assert_eq!(
            LifecycleStatus::parse("Endorsed").unwrap(),
            LifecycleStatus::Endorsed
        );
        assert_eq!(
            LifecycleStatus::parse("APPROVED").unwrap(),
            LifecycleStatus::Approved
        );
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert!(LifecycleStatus::parse("archived").is_err());
    }

    #[test]
    fn round_trips_through_as_str() {
        for status in [
            LifecycleStatus::Pending,
            LifecycleStatus::Endorsed,
            LifecycleStatus::Approved,
            LifecycleStatus::Rejected,
        ] {
            assert_eq!(LifecycleStatus::parse(status.as_str()).unwrap(), status);
        }
    }
}
