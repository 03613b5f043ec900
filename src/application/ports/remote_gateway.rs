use crate::domain::entities::{ApplicationImage, MeteringApplication};
use crate::domain::value_objects::{ApplicationId, LifecycleStatus};
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// An application as the remote system of record reports it, statuses
/// already validated at the wire boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteApplication {
    pub application_id: ApplicationId,
    pub status: LifecycleStatus,
    pub remarks: Option<String>,
    pub fields: Map<String, Value>,
}

impl RemoteApplication {
    /// The same flat wire object `MeteringApplication::outbound_fields`
    /// builds, composed from the remote side for diffing.
    pub fn wire_fields(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            "status".to_string(),
            Value::String(self.status.as_str().to_string()),
        );
        map.insert(
            "remarks".to_string(),
            match &self.remarks {
                Some(remarks) => Value::String(remarks.clone()),
                None => Value::Null,
            },
        );
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        map
    }
}

/// One row of the remote status listing consumed by the reconciler.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteStatus {
    pub application_id: ApplicationId,
    pub status: LifecycleStatus,
    pub remarks: Option<String>,
}

/// The remote system of record. A `{success: false}` acknowledgment is an
/// error at this boundary; callers only ever see confirmed writes.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Existence check driving create-vs-update. `None` means the remote
    /// has never seen this id.
    async fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<RemoteApplication>, AppError>;

    /// Every application status the remote tracks; not owner-scoped.
    async fn fetch_status_list(&self) -> Result<Vec<RemoteStatus>, AppError>;

    async fn create_application(
        &self,
        application: &MeteringApplication,
    ) -> Result<(), AppError>;

    /// Partial update carrying only the changed wire entries.
    async fn update_application(
        &self,
        id: &ApplicationId,
        changed: &Map<String, Value>,
    ) -> Result<(), AppError>;

    async fn upload_image(&self, image: &ApplicationImage, bytes: Vec<u8>) -> Result<(), AppError>;
}
