pub mod ports;
pub mod services;

pub use services::{
    ApplicationService, ReconcileOutcome, StatusReconciler, SyncService, UploadOutcome,
    UploadSynchronizer,
};
