use super::payloads::{
    Acknowledgment, ApplicationListResponse, CreateRequest, FindRequest, StatusListRequest,
    StatusListResponse, UpdateRequest, WireApplication, WireStatus,
};
use crate::application::ports::{RemoteApplication, RemoteGateway, RemoteStatus};
use crate::domain::entities::{ApplicationImage, MeteringApplication};
use crate::domain::value_objects::ApplicationId;
use crate::shared::config::RemoteConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::multipart;
use serde_json::{Map, Value};
use std::time::Duration;

/// Remote system of record over JSON-POST endpoints plus one multipart
/// upload. The request timeout bounds every call so a hung endpoint
/// cannot stall a sync pass indefinitely.
pub struct HttpRemoteGateway {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl HttpRemoteGateway {
    pub fn new(config: &RemoteConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn acknowledged(response: reqwest::Response) -> Result<(), AppError> {
        let ack: Acknowledgment = response.error_for_status()?.json().await?;
        if ack.success {
            Ok(())
        } else {
            Err(AppError::RemoteRejected(
                ack.message
                    .unwrap_or_else(|| "request not accepted".to_string()),
            ))
        }
    }
}

#[async_trait]
impl RemoteGateway for HttpRemoteGateway {
    async fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<RemoteApplication>, AppError> {
        let response = self
            .http
            .post(self.endpoint("applications/find"))
            .json(&FindRequest {
                key: &self.api_key,
                application_id: id.as_str(),
            })
            .send()
            .await?
            .error_for_status()?;

        let body: ApplicationListResponse = response.json().await?;
        body.metering_applications
            .into_iter()
            .next()
            .map(WireApplication::into_remote)
            .transpose()
    }

    async fn fetch_status_list(&self) -> Result<Vec<RemoteStatus>, AppError> {
        let response = self
            .http
            .post(self.endpoint("applications/statuses"))
            .json(&StatusListRequest { key: &self.api_key })
            .send()
            .await?
            .error_for_status()?;

        let body: StatusListResponse = response.json().await?;
        body.metering_applications
            .into_iter()
            .map(WireStatus::into_remote)
            .collect()
    }

    async fn create_application(&self, application: &MeteringApplication) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.endpoint("applications/create"))
            .json(&CreateRequest {
                application: WireApplication::from_entity(application),
            })
            .send()
            .await?;

        Self::acknowledged(response).await
    }

    async fn update_application(
        &self,
        id: &ApplicationId,
        changed: &Map<String, Value>,
    ) -> Result<(), AppError> {
        let mut application = changed.clone();
        application.insert(
            "application_id".to_string(),
            Value::String(id.as_str().to_string()),
        );

        let response = self
            .http
            .post(self.endpoint("applications/update"))
            .json(&UpdateRequest { application })
            .send()
            .await?;

        Self::acknowledged(response).await
    }

    async fn upload_image(&self, image: &ApplicationImage, bytes: Vec<u8>) -> Result<(), AppError> {
        let part = multipart::Part::bytes(bytes).file_name(image.upload_name().to_string());
        let form = multipart::Form::new()
            .part("image", part)
            .text("reference_id", image.reference_id.as_str().to_string())
            .text("image_type", image.kind.as_str().to_string())
            .text("image_name", image.upload_name().to_string());

        let response = self
            .http
            .post(self.endpoint("images/upload"))
            .multipart(form)
            .send()
            .await?;

        Self::acknowledged(response).await
    }
}
