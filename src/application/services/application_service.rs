use crate::application::ports::ApplicationStore;
use crate::domain::entities::{ApplicationImage, MeteringApplication};
use crate::domain::value_objects::{ApplicationId, ElectricianId, FieldMap, ImageKind};
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Store surface the capture/form screens talk to. Every mutation leaves
/// the touched rows `Unsynced`; the sync passes pick them up from there.
pub struct ApplicationService {
    store: Arc<dyn ApplicationStore>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn ApplicationStore>) -> Self {
        Self { store }
    }

    pub async fn create_application(
        &self,
        owner: ElectricianId,
        fields: FieldMap,
    ) -> Result<MeteringApplication, AppError> {
        let application = MeteringApplication::draft(owner, fields);
        self.store.insert_application(&application).await?;
        info!(application_id = %application.id, "Application captured locally");
        Ok(application)
    }

    /// Merges a partial form update into the stored fields. Null entries
    /// leave their key unchanged.
    pub async fn update_fields(
        &self,
        id: &ApplicationId,
        patch: FieldMap,
    ) -> Result<(), AppError> {
        let Some(mut application) = self.store.application(id).await? else {
            return Err(AppError::NotFound(format!("Application {id} not found")));
        };

        application.fields.merge(patch);
        let matched = self
            .store
            .update_application_fields(id, &application.fields)
            .await?;
        if !matched {
            return Err(AppError::NotFound(format!("Application {id} not found")));
        }
        Ok(())
    }

    /// `Ok(true)` when the row transitioned to `Endorsed`, `Ok(false)` when
    /// it already was, `NotFound` when there is no such row.
    pub async fn endorse(&self, id: &ApplicationId) -> Result<bool, AppError> {
        if self.store.endorse_application(id).await? {
            info!(application_id = %id, "Application endorsed");
            return Ok(true);
        }
        match self.store.application(id).await? {
            Some(_) => Ok(false),
            None => Err(AppError::NotFound(format!("Application {id} not found"))),
        }
    }

    /// Bulk-attaches captured files, one `Unsynced` row per URL,
    /// all-or-nothing.
    pub async fn attach_images(
        &self,
        urls: Vec<String>,
        reference_id: &ApplicationId,
        kind: ImageKind,
    ) -> Result<Vec<ApplicationImage>, AppError> {
        let images: Vec<ApplicationImage> = urls
            .into_iter()
            .map(|url| ApplicationImage::new(url, reference_id.clone(), kind.clone()))
            .collect();
        self.store.insert_images(&images).await?;
        info!(
            reference_id = %reference_id,
            count = images.len(),
            "Images attached"
        );
        Ok(images)
    }

    pub async fn remove_image(&self, image_url: &str) -> Result<(), AppError> {
        self.store.delete_image(image_url).await
    }

    pub async fn delete_application(&self, id: &ApplicationId) -> Result<(), AppError> {
        self.store.delete_application(id).await?;
        info!(application_id = %id, "Application deleted");
        Ok(())
    }

    pub async fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<MeteringApplication>, AppError> {
        self.store.application(id).await
    }

    pub async fn applications_for_owner(
        &self,
        owner: &ElectricianId,
    ) -> Result<Vec<MeteringApplication>, AppError> {
        self.store.applications_for_owner(owner).await
    }

    pub async fn images_for_application(
        &self,
        reference_id: &ApplicationId,
    ) -> Result<Vec<ApplicationImage>, AppError> {
        self.store.images_for_application(reference_id).await
    }
}
