use crate::domain::value_objects::{
    diff_objects, ApplicationId, ElectricianId, FieldMap, LifecycleStatus, SyncStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A metering application captured in the field. Lives in the local cache
/// until the upload pass pushes it to the remote system of record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteringApplication {
    pub id: ApplicationId,
    pub electrician_id: ElectricianId,
    pub status: LifecycleStatus,
    pub remarks: Option<String>,
    pub fields: FieldMap,
    pub sync_status: SyncStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MeteringApplication {
    /// A freshly captured application: generated id, `Pending`, dirty.
    pub fn draft(electrician_id: ElectricianId, fields: FieldMap) -> Self {
        let now = Utc::now();
        Self {
            id: ApplicationId::generate(&electrician_id),
            electrician_id,
            status: LifecycleStatus::Pending,
            remarks: None,
            fields,
            sync_status: SyncStatus::Unsynced,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_as_synced(&mut self) {
        self.sync_status = SyncStatus::Synced;
    }

    pub fn mark_as_unsynced(&mut self) {
        self.sync_status = SyncStatus::Unsynced;
        self.updated_at = Utc::now();
    }

    /// The flat wire object pushed on create and compared on update:
    /// engine-owned keys plus the opaque fields, one level deep. Identity
    /// and owner are carried separately and never diffed.
    pub fn outbound_fields(&self) -> Map<String, Value> {
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
        for (key, value) in self.fields.as_map() {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    /// Entries of the local wire object that differ from the remote copy.
    /// An empty result means both sides already agree.
    pub fn changed_fields(&self, remote_fields: &Map<String, Value>) -> Map<String, Value> {
        diff_objects(&self.outbound_fields(), remote_fields)
    }
}
