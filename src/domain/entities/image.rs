use crate::domain::value_objects::{ApplicationId, ImageKind, SyncStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured file attached to an application. The local path doubles
/// as the row key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationImage {
    pub image_url: String,
    pub reference_id: ApplicationId,
    pub kind: ImageKind,
    pub sync_status: SyncStatus,
    pub created_at: DateTime<Utc>,
}

impl ApplicationImage {
    pub fn new(image_url: String, reference_id: ApplicationId, kind: ImageKind) -> Self {
        Self {
            image_url,
            reference_id,
            kind,
            sync_status: SyncStatus::Unsynced,
            created_at: Utc::now(),
        }
    }

    /// File name sent with the multipart upload; falls back to the whole
    /// path when it has no final component.
    pub fn upload_name(&self) -> &str {
        std::path::Path::new(&self.image_url)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.image_url)
    }
}
