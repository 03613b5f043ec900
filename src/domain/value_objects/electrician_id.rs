use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the electrician who owns a record. Assigned at login,
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElectricianId(String);

impl ElectricianId {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four digits of the id, zero-padded, used when composing
    /// application ids.
    pub fn digit_suffix(&self) -> String {
        let digits: Vec<char> = self.0.chars().filter(|c| c.is_ascii_digit()).collect();
        let start = digits.len().saturating_sub(4);
        let tail: String = digits[start..].iter().collect();
        format!("{tail:0>4}")
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Electrician ID cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for ElectricianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ElectricianId> for String {
    fn from(value: ElectricianId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_input() {
        assert!(ElectricianId::new("   ".to_string()).is_err());
    }

    #[test]
    fn digit_suffix_takes_last_four_digits() {
        let id = ElectricianId::new("EL-19880001".to_string()).unwrap();
        assert_eq!(id.digit_suffix(), "0001");
    }

    #[test]
    fn digit_suffix_pads_short_ids() {
        let id = ElectricianId::new("EL-7".to_string()).unwrap();
        assert_eq!(id.digit_suffix(), "0007");

        let id = ElectricianId::new("no-digits".to_string()).unwrap();
        assert_eq!(id.digit_suffix(), "0000");
    }
}
