use crate::application::ports::{ApplicationStore, ImageFileStore, RemoteGateway};
use crate::application::services::{StatusReconciler, UploadSynchronizer};
use crate::domain::entities::UploadReport;
use crate::domain::value_objects::{ApplicationId, ElectricianId};
use crate::shared::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of one upload pass. Failures are absorbed at this boundary;
/// callers treat them as "try again later", never as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    AlreadyRunning,
    NothingPending,
    Completed(UploadReport),
    Failed,
}

/// Outcome of one status reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    AlreadyRunning,
    Completed { corrections: u32 },
    Failed,
}

/// The externally consumed entry point: sequences the reconciler and the
/// upload synchronizer and guarantees at most one in-flight pass of each
/// kind per process. Concurrent triggers are dropped, not queued.
pub struct SyncService {
    store: Arc<dyn ApplicationStore>,
    synchronizer: UploadSynchronizer,
    reconciler: StatusReconciler,
    upload_running: Arc<AtomicBool>,
    status_running: Arc<AtomicBool>,
}

impl SyncService {
    pub fn new(
        store: Arc<dyn ApplicationStore>,
        remote: Arc<dyn RemoteGateway>,
        files: Arc<dyn ImageFileStore>,
    ) -> Self {
        Self {
            synchronizer: UploadSynchronizer::new(store.clone(), remote.clone(), files),
            reconciler: StatusReconciler::new(store.clone(), remote),
            store,
            upload_running: Arc::new(AtomicBool::new(false)),
            status_running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs one upload pass unless one is already in flight. The flag is
    /// released when the guard drops, so no error or early return can
    /// leave it stuck.
    pub async fn start_sync(&self) -> UploadOutcome {
        let Some(_guard) = InFlight::acquire(&self.upload_running) else {
            info!("Upload sync already running; skipping");
            return UploadOutcome::AlreadyRunning;
        };

        let pending = match self.store.has_pending_rows().await {
            Ok(pending) => pending,
            Err(err) => {
                error!(error = %err, "Could not check for pending rows");
                return UploadOutcome::Failed;
            }
        };
        if !pending {
            info!("Nothing to upload");
            return UploadOutcome::NothingPending;
        }

        match self.synchronizer.run().await {
            Ok(report) => {
                if report.is_clean() {
                    info!(
                        applications = report.applications_synced,
                        images = report.images_synced,
                        "Upload pass completed"
                    );
                } else {
                    warn!(
                        applications_failed = report.applications_failed,
                        images_failed = report.images_failed,
                        "Upload pass completed with failures"
                    );
                }
                UploadOutcome::Completed(report)
            }
            Err(err) => {
                error!(error = %err, "Upload pass aborted");
                UploadOutcome::Failed
            }
        }
    }

    /// Runs one reconcile pass for `owner` behind its own flag, independent
    /// of the upload flag.
    pub async fn start_status_sync(&self, owner: &ElectricianId) -> ReconcileOutcome {
        let Some(_guard) = InFlight::acquire(&self.status_running) else {
            info!("Status sync already running; skipping");
            return ReconcileOutcome::AlreadyRunning;
        };

        match self.reconciler.reconcile(owner).await {
            Ok(corrections) => ReconcileOutcome::Completed { corrections },
            Err(err) => {
                error!(error = %err, "Status reconciliation aborted");
                ReconcileOutcome::Failed
            }
        }
    }

    /// Advisory 0-100 completion indicator for one application, polled by
    /// UI collaborators. Gates nothing.
    pub async fn sync_percentage(&self, id: &ApplicationId) -> Result<u8, AppError> {
        let counts = self.store.sync_counts(id).await?;
        Ok(counts.percentage())
    }

    /// Background loop: reconcile, then upload, every `interval_secs`.
    /// Outcomes are logged inside the passes; the handle lets the caller
    /// stop the loop on shutdown.
    pub fn schedule(
        &self,
        owner: ElectricianId,
        interval_secs: u64,
    ) -> tokio::task::JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(interval_secs));

            loop {
                interval.tick().await;

                service.start_status_sync(&owner).await;
                service.start_sync().await;
            }
        })
    }
}

impl Clone for SyncService {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            synchronizer: self.synchronizer.clone(),
            reconciler: self.reconciler.clone(),
            upload_running: self.upload_running.clone(),
            status_running: self.status_running.clone(),
        }
    }
}

/// Holds an in-flight flag; releasing happens in `Drop` on every path.
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
