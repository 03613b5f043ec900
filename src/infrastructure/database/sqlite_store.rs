use super::connection_pool::ConnectionPool;
use super::mappers::{application_from_row, image_from_row};
use super::queries::{
    APPLY_REMOTE_CORRECTION, DELETE_APPLICATION, DELETE_IMAGE, DELETE_IMAGES_BY_REFERENCE,
    ENDORSE_APPLICATION, INSERT_APPLICATION, INSERT_IMAGE, SELECT_APPLICATIONS_BY_OWNER,
    SELECT_APPLICATION_BY_ID, SELECT_HAS_PENDING, SELECT_IMAGES_BY_REFERENCE,
    SELECT_IMAGE_URLS_BY_REFERENCE, SELECT_OWNER_STATUS_INDEX, SELECT_SYNC_COUNTS,
    SELECT_UNSYNCED_APPLICATIONS, SELECT_UNSYNCED_IMAGES, UPDATE_APPLICATION_FIELDS,
    UPDATE_APPLICATION_SYNC_STATUS, UPDATE_IMAGE_SYNC_STATUS,
};
use super::rows::{ApplicationRow, ImageRow};
use crate::application::ports::{ApplicationStore, ImageFileStore};
use crate::domain::entities::{ApplicationImage, MeteringApplication, SyncCounts};
use crate::domain::value_objects::{
    ApplicationId, ElectricianId, FieldMap, LifecycleStatus, SyncStatus,
};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;
use tracing::warn;

/// SQLite-backed application store. Owns the cascade between image rows
/// and their files, so callers never touch both halves separately.
pub struct SqliteApplicationStore {
    pool: ConnectionPool,
    files: Arc<dyn ImageFileStore>,
}

impl SqliteApplicationStore {
    pub fn new(pool: ConnectionPool, files: Arc<dyn ImageFileStore>) -> Self {
        Self { pool, files }
    }

    fn fields_json(fields: &FieldMap) -> Result<String, AppError> {
        Ok(serde_json::to_string(fields.as_map())?)
    }
}

#[async_trait]
impl ApplicationStore for SqliteApplicationStore {
    async fn insert_application(&self, application: &MeteringApplication) -> Result<(), AppError> {
        sqlx::query(INSERT_APPLICATION)
            .bind(application.id.as_str())
            .bind(application.electrician_id.as_str())
            .bind(application.status.as_str())
            .bind(application.remarks.as_deref())
            .bind(Self::fields_json(&application.fields)?)
            .bind(application.sync_status.as_str())
            .bind(application.created_at.timestamp_millis())
            .bind(application.updated_at.timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }

    async fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<MeteringApplication>, AppError> {
        let row: Option<ApplicationRow> = sqlx::query_as(SELECT_APPLICATION_BY_ID)
            .bind(id.as_str())
            .fetch_optional(self.pool.get_pool())
            .await?;
        row.map(application_from_row).transpose()
    }

    async fn applications_for_owner(
        &self,
        owner: &ElectricianId,
    ) -> Result<Vec<MeteringApplication>, AppError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(SELECT_APPLICATIONS_BY_OWNER)
            .bind(owner.as_str())
            .fetch_all(self.pool.get_pool())
            .await?;
        rows.into_iter().map(application_from_row).collect()
    }

    async fn owner_status_index(
        &self,
        owner: &ElectricianId,
    ) -> Result<Vec<(ApplicationId, LifecycleStatus)>, AppError> {
        let rows = sqlx::query(SELECT_OWNER_STATUS_INDEX)
            .bind(owner.as_str())
            .fetch_all(self.pool.get_pool())
            .await?;

        rows.into_iter()
            .map(|row| {
                let id: String = row.try_get("application_id")?;
                let status: String = row.try_get("status")?;
                Ok((
                    ApplicationId::new(id).map_err(AppError::Database)?,
                    LifecycleStatus::parse(&status).map_err(AppError::Database)?,
                ))
            })
            .collect()
    }

    async fn update_application_fields(
        &self,
        id: &ApplicationId,
        fields: &FieldMap,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(UPDATE_APPLICATION_FIELDS)
            .bind(id.as_str())
            .bind(Self::fields_json(fields)?)
            .bind(SyncStatus::Unsynced.as_str())
            .bind(Utc::now().timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn apply_remote_correction(
        &self,
        id: &ApplicationId,
        status: LifecycleStatus,
        remarks: Option<&str>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(APPLY_REMOTE_CORRECTION)
            .bind(id.as_str())
            .bind(status.as_str())
            .bind(remarks)
            .bind(SyncStatus::Unsynced.as_str())
            .bind(Utc::now().timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn endorse_application(&self, id: &ApplicationId) -> Result<bool, AppError> {
        let result = sqlx::query(ENDORSE_APPLICATION)
            .bind(id.as_str())
            .bind(LifecycleStatus::Endorsed.as_str())
            .bind(SyncStatus::Unsynced.as_str())
            .bind(Utc::now().timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_application(&self, id: &ApplicationId) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;

        let urls: Vec<String> = sqlx::query_scalar(SELECT_IMAGE_URLS_BY_REFERENCE)
            .bind(id.as_str())
            .fetch_all(&mut *tx)
            .await?;

        sqlx::query(DELETE_IMAGES_BY_REFERENCE)
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        // A file-store failure returns here and drops the transaction,
        // so no row deletion commits.
        for url in &urls {
            self.files.remove(url)?;
        }

        sqlx::query(DELETE_APPLICATION)
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn unsynced_applications(&self) -> Result<Vec<MeteringApplication>, AppError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(SELECT_UNSYNCED_APPLICATIONS)
            .bind(SyncStatus::Unsynced.as_str())
            .fetch_all(self.pool.get_pool())
            .await?;
        rows.into_iter().map(application_from_row).collect()
    }

    async fn mark_application_synced(&self, id: &ApplicationId) -> Result<(), AppError> {
        sqlx::query(UPDATE_APPLICATION_SYNC_STATUS)
            .bind(id.as_str())
            .bind(SyncStatus::Synced.as_str())
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }

    async fn mark_application_unsynced(&self, id: &ApplicationId) -> Result<(), AppError> {
        sqlx::query(UPDATE_APPLICATION_SYNC_STATUS)
            .bind(id.as_str())
            .bind(SyncStatus::Unsynced.as_str())
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }

    async fn insert_images(&self, images: &[ApplicationImage]) -> Result<(), AppError> {
        if images.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.get_pool().begin().await?;
        for image in images {
            sqlx::query(INSERT_IMAGE)
                .bind(&image.image_url)
                .bind(image.reference_id.as_str())
                .bind(image.kind.as_str())
                .bind(image.sync_status.as_str())
                .bind(image.created_at.timestamp_millis())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn images_for_application(
        &self,
        reference_id: &ApplicationId,
    ) -> Result<Vec<ApplicationImage>, AppError> {
        let rows: Vec<ImageRow> = sqlx::query_as(SELECT_IMAGES_BY_REFERENCE)
            .bind(reference_id.as_str())
            .fetch_all(self.pool.get_pool())
            .await?;
        rows.into_iter().map(image_from_row).collect()
    }

    async fn unsynced_images(&self) -> Result<Vec<ApplicationImage>, AppError> {
        let rows: Vec<ImageRow> = sqlx::query_as(SELECT_UNSYNCED_IMAGES)
            .bind(SyncStatus::Unsynced.as_str())
            .fetch_all(self.pool.get_pool())
            .await?;
        rows.into_iter().map(image_from_row).collect()
    }

    async fn mark_image_synced(&self, image_url: &str) -> Result<(), AppError> {
        sqlx::query(UPDATE_IMAGE_SYNC_STATUS)
            .bind(image_url)
            .bind(SyncStatus::Synced.as_str())
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }

    async fn delete_image(&self, image_url: &str) -> Result<(), AppError> {
        sqlx::query(DELETE_IMAGE)
            .bind(image_url)
            .execute(self.pool.get_pool())
            .await?;

        // Row first; a leftover file is recoverable, a dangling row is not.
        if let Err(e) = self.files.remove(image_url) {
            warn!("Failed to remove image file {}: {}", image_url, e);
        }
        Ok(())
    }

    async fn sync_counts(&self, id: &ApplicationId) -> Result<SyncCounts, AppError> {
        let row = sqlx::query(SELECT_SYNC_COUNTS)
            .bind(id.as_str())
            .bind(SyncStatus::Synced.as_str())
            .fetch_one(self.pool.get_pool())
            .await?;

        let total: i64 = row.try_get("total")?;
        let synced: i64 = row.try_get("synced")?;
        Ok(SyncCounts {
            synced: synced as u32,
            total: total as u32,
        })
    }

    async fn has_pending_rows(&self) -> Result<bool, AppError> {
        let pending: i64 = sqlx::query_scalar(SELECT_HAS_PENDING)
            .bind(SyncStatus::Unsynced.as_str())
            .fetch_one(self.pool.get_pool())
            .await?;
        Ok(pending != 0)
    }
}

#[cfg(test)]
mod tests;
