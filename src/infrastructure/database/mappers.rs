use super::rows::{ApplicationRow, ImageRow};
use crate::domain::entities::{ApplicationImage, MeteringApplication};
use crate::domain::value_objects::{
    ApplicationId, ElectricianId, FieldMap, ImageKind, LifecycleStatus, SyncStatus,
};
use crate::shared::error::AppError;
use chrono::{DateTime, Utc};

/// A stored value that no longer parses means the cache is corrupt, so
/// every conversion failure here surfaces as a database error.
pub(super) fn application_from_row(row: ApplicationRow) -> Result<MeteringApplication, AppError> {
    Ok(MeteringApplication {
        id: ApplicationId::new(row.application_id).map_err(corrupt_row)?,
        electrician_id: ElectricianId::new(row.electrician_id).map_err(corrupt_row)?,
        status: LifecycleStatus::parse(&row.status).map_err(corrupt_row)?,
        remarks: row.remarks,
        fields: FieldMap::from_json_str(&row.fields).map_err(corrupt_row)?,
        sync_status: SyncStatus::parse(&row.sync_status).map_err(corrupt_row)?,
        created_at: timestamp_from_millis(row.created_at)?,
        updated_at: timestamp_from_millis(row.updated_at)?,
    })
}

pub(super) fn image_from_row(row: ImageRow) -> Result<ApplicationImage, AppError> {
    Ok(ApplicationImage {
        image_url: row.image_url,
        reference_id: ApplicationId::new(row.reference_id).map_err(corrupt_row)?,
        kind: ImageKind::new(row.image_type).map_err(corrupt_row)?,
        sync_status: SyncStatus::parse(&row.sync_status).map_err(corrupt_row)?,
        created_at: timestamp_from_millis(row.created_at)?,
    })
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::Database(format!("Timestamp out of range: {millis}")))
}

fn corrupt_row(message: String) -> AppError {
    AppError::Database(format!("Corrupt row: {message}"))
}
