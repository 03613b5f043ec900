use serde::{Deserialize, Serialize};
use std::fmt;

/// Category label of a captured image (e.g. `Meterbase`, `Signature`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageKind(String);

impl ImageKind {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Image type cannot be empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ImageKind> for String {
    fn from(kind: ImageKind) -> Self {
        kind.0
    }
}
