use crate::application::ports::{ApplicationStore, ImageFileStore, RemoteGateway};
use crate::domain::entities::{ApplicationImage, MeteringApplication, UploadReport};
use crate::shared::error::AppError;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Push pass: every dirty application and image goes to the remote system,
/// and a row is only marked `Synced` on an explicit acknowledgment.
///
/// Applications are pushed concurrently, images sequentially; one record's
/// remote failure never touches another's. Store errors abort the pass.
#[derive(Clone)]
pub struct UploadSynchronizer {
    store: Arc<dyn ApplicationStore>,
    remote: Arc<dyn RemoteGateway>,
    files: Arc<dyn ImageFileStore>,
}

impl UploadSynchronizer {
    pub fn new(
        store: Arc<dyn ApplicationStore>,
        remote: Arc<dyn RemoteGateway>,
        files: Arc<dyn ImageFileStore>,
    ) -> Self {
        Self {
            store,
            remote,
            files,
        }
    }

    pub async fn run(&self) -> Result<UploadReport, AppError> {
        let mut report = UploadReport::default();
        self.push_applications(&mut report).await?;
        self.push_images(&mut report).await?;
        debug!(
            applications_synced = report.applications_synced,
            applications_failed = report.applications_failed,
            images_synced = report.images_synced,
            images_failed = report.images_failed,
            images_skipped = report.images_skipped,
            "Upload pass finished"
        );
        Ok(report)
    }

    async fn push_applications(&self, report: &mut UploadReport) -> Result<(), AppError> {
        let pending = self.store.unsynced_applications().await?;
        if pending.is_empty() {
            return Ok(());
        }
        debug!(count = pending.len(), "Pushing unsynced applications");

        let outcomes = join_all(
            pending
                .into_iter()
                .map(|application| self.push_application(application)),
        )
        .await;

        for outcome in outcomes {
            if outcome? {
                report.applications_synced += 1;
            } else {
                report.applications_failed += 1;
            }
        }
        Ok(())
    }

    /// `Ok(true)` when the record ended up `Synced`, `Ok(false)` when the
    /// remote failed and the row stays dirty for the next pass. Only store
    /// errors escape.
    async fn push_application(&self, application: MeteringApplication) -> Result<bool, AppError> {
        match self.push_record(&application).await {
            Ok(()) => {
                self.store.mark_application_synced(&application.id).await?;
                debug!(application_id = %application.id, "Application synced");
                Ok(true)
            }
            Err(err) => {
                warn!(
                    application_id = %application.id,
                    error = %err,
                    "Application push failed; row stays unsynced"
                );
                // Idempotent: the row usually already reads Unsynced.
                self.store
                    .mark_application_unsynced(&application.id)
                    .await?;
                Ok(false)
            }
        }
    }

    /// Create-vs-update detection against the remote copy. A record whose
    /// remote copy already matches is converged; the caller marks it
    /// `Synced` without any further write.
    async fn push_record(&self, application: &MeteringApplication) -> Result<(), AppError> {
        match self.remote.fetch_application(&application.id).await? {
            Some(remote) => {
                let changed = application.changed_fields(&remote.wire_fields());
                if changed.is_empty() {
                    debug!(application_id = %application.id, "Remote copy already matches");
                    return Ok(());
                }
                debug!(
                    application_id = %application.id,
                    changed = changed.len(),
                    "Updating remote application"
                );
                self.remote.update_application(&application.id, &changed).await
            }
            None => {
                debug!(application_id = %application.id, "Creating remote application");
                self.remote.create_application(application).await
            }
        }
    }

    async fn push_images(&self, report: &mut UploadReport) -> Result<(), AppError> {
        let pending = self.store.unsynced_images().await?;
        if pending.is_empty() {
            return Ok(());
        }
        debug!(count = pending.len(), "Uploading unsynced images");

        for image in pending {
            self.push_image(&image, report).await?;
        }
        Ok(())
    }

    async fn push_image(
        &self,
        image: &ApplicationImage,
        report: &mut UploadReport,
    ) -> Result<(), AppError> {
        let bytes = match self.files.read(&image.image_url) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                warn!(image_url = %image.image_url, "Local file missing; skipping image");
                report.images_skipped += 1;
                return Ok(());
            }
            Err(err) => {
                warn!(image_url = %image.image_url, error = %err, "Could not read image file");
                report.images_failed += 1;
                return Ok(());
            }
        };

        match self.remote.upload_image(image, bytes).await {
            Ok(()) => {
                self.store.mark_image_synced(&image.image_url).await?;
                report.images_synced += 1;
            }
            Err(err) => {
                warn!(
                    image_url = %image.image_url,
                    error = %err,
                    "Image upload failed; row stays unsynced"
                );
                report.images_failed += 1;
            }
        }
        Ok(())
    }
}
