pub mod application_service;
pub mod status_reconciler;
pub mod sync_service;
pub mod upload_synchronizer;

pub use application_service::ApplicationService;
pub use status_reconciler::StatusReconciler;
pub use sync_service::{ReconcileOutcome, SyncService, UploadOutcome};
pub use upload_synchronizer::UploadSynchronizer;
