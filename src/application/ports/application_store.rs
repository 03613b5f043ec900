use crate::domain::entities::{ApplicationImage, MeteringApplication, SyncCounts};
use crate::domain::value_objects::{ApplicationId, ElectricianId, FieldMap, LifecycleStatus};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Local cache of applications and images. The single source of truth
/// every other component reads from and writes to.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert_application(
        &self,
        application: &MeteringApplication,
    ) -> Result<(), AppError>;

    async fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<MeteringApplication>, AppError>;

    async fn applications_for_owner(
        &self,
        owner: &ElectricianId,
    ) -> Result<Vec<MeteringApplication>, AppError>;

    /// Id/status pairs for one owner, the reconciler's local index.
    async fn owner_status_index(
        &self,
        owner: &ElectricianId,
    ) -> Result<Vec<(ApplicationId, LifecycleStatus)>, AppError>;

    /// Overwrites the opaque fields and dirties the row. Returns whether a
    /// row matched.
    async fn update_application_fields(
        &self,
        id: &ApplicationId,
        fields: &FieldMap,
    ) -> Result<bool, AppError>;

    /// Remote-wins correction: status and remarks from the remote record,
    /// row dirtied so the next upload pushes the merged state back.
    /// Returns whether a row matched; an absent id is a no-op.
    async fn apply_remote_correction(
        &self,
        id: &ApplicationId,
        status: LifecycleStatus,
        remarks: Option<&str>,
    ) -> Result<bool, AppError>;

    /// Conditional `Pending -> Endorsed` transition. Returns whether a row
    /// transitioned; an already endorsed or absent row reports `false`.
    async fn endorse_application(&self, id: &ApplicationId) -> Result<bool, AppError>;

    /// Cascade delete: image rows, their local files, then the application
    /// row, all in one transaction. A file-store failure rolls everything
    /// back.
    async fn delete_application(&self, id: &ApplicationId) -> Result<(), AppError>;

    async fn unsynced_applications(&self) -> Result<Vec<MeteringApplication>, AppError>;

    async fn mark_application_synced(&self, id: &ApplicationId) -> Result<(), AppError>;

    async fn mark_application_unsynced(&self, id: &ApplicationId) -> Result<(), AppError>;

    /// All-or-nothing bulk insert; a partial batch is never observable.
    async fn insert_images(&self, images: &[ApplicationImage]) -> Result<(), AppError>;

    async fn images_for_application(
        &self,
        reference_id: &ApplicationId,
    ) -> Result<Vec<ApplicationImage>, AppError>;

    async fn unsynced_images(&self) -> Result<Vec<ApplicationImage>, AppError>;

    async fn mark_image_synced(&self, image_url: &str) -> Result<(), AppError>;

    /// Deletes the row, then attempts best-effort file removal.
    async fn delete_image(&self, image_url: &str) -> Result<(), AppError>;

    /// Synced/total tally across the application row and its image rows.
    async fn sync_counts(&self, id: &ApplicationId) -> Result<SyncCounts, AppError>;

    /// Whether any application or image row is still `Unsynced`.
    async fn has_pending_rows(&self) -> Result<bool, AppError>;
}
