use super::electrician_id::ElectricianId;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Client-generated application identifier, e.g. `APID-000112345678`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Composes an id without remote coordination: the owner's digit suffix
    /// binds it to the electrician, the clock and a random draw keep
    /// concurrent generations apart.
    pub fn generate(owner: &ElectricianId) -> Self {
        let seconds = Utc::now().timestamp();
        let random: u16 = rand::thread_rng().gen_range(0..10_000);
        Self(format!(
            "APID-{}{:04}{:04}",
            owner.digit_suffix(),
            seconds % 10_000,
            random
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Application ID cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ApplicationId> for String {
    fn from(value: ApplicationId) -> Self {
        value.0
    }
}
