use crate::application::ports::{RemoteApplication, RemoteStatus};
use crate::domain::entities::MeteringApplication;
use crate::domain::value_objects::{ApplicationId, LifecycleStatus};
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An application as it crosses the wire: engine-owned keys are named,
/// everything else rides in the flattened remainder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct WireApplication {
    pub application_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrician_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl WireApplication {
    pub fn from_entity(application: &MeteringApplication) -> Self {
        Self {
            application_id: application.id.as_str().to_string(),
            electrician_id: Some(application.electrician_id.as_str().to_string()),
            status: application.status.as_str().to_string(),
            remarks: application.remarks.clone(),
            fields: application.fields.as_map().clone(),
        }
    }

    pub fn into_remote(self) -> Result<RemoteApplication, AppError> {
        Ok(RemoteApplication {
            application_id: ApplicationId::new(self.application_id)
                .map_err(AppError::Serialization)?,
            status: LifecycleStatus::parse(&self.status).map_err(AppError::Serialization)?,
            remarks: self.remarks,
            fields: self.fields,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct WireStatus {
    pub application_id: String,
    pub status: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl WireStatus {
    pub fn into_remote(self) -> Result<RemoteStatus, AppError> {
        Ok(RemoteStatus {
            application_id: ApplicationId::new(self.application_id)
                .map_err(AppError::Serialization)?,
            status: LifecycleStatus::parse(&self.status).map_err(AppError::Serialization)?,
            remarks: self.remarks,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct FindRequest<'a> {
    pub key: &'a str,
    pub application_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct StatusListRequest<'a> {
    pub key: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApplicationListResponse {
    #[serde(rename = "meteringApplications", default)]
    pub metering_applications: Vec<WireApplication>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StatusListResponse {
    #[serde(rename = "meteringApplications", default)]
    pub metering_applications: Vec<WireStatus>,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateRequest {
    pub application: WireApplication,
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateRequest {
    pub application: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Acknowledgment {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
