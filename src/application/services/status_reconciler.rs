use crate::application::ports::{ApplicationStore, RemoteGateway, RemoteStatus};
use crate::domain::value_objects::{ApplicationId, ElectricianId, LifecycleStatus};
use crate::shared::error::AppError;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Remote-wins pull for `status`/`remarks`: approvals, rejections and
/// review remarks decided remotely are copied onto the local rows. A
/// corrected row comes back `Unsynced` so the next upload pushes the rest
/// of its local state against the new baseline.
#[derive(Clone)]
pub struct StatusReconciler {
    store: Arc<dyn ApplicationStore>,
    remote: Arc<dyn RemoteGateway>,
}

impl StatusReconciler {
    pub fn new(store: Arc<dyn ApplicationStore>, remote: Arc<dyn RemoteGateway>) -> Self {
        Self { store, remote }
    }

    /// Runs one reconcile pass for `owner`. Returns how many corrections
    /// matched a local row.
    ///
    /// The pass aborts on the first gateway or store error: corrections
    /// that already committed stay (each is atomic on its own), no further
    /// ones are attempted.
    pub async fn reconcile(&self, owner: &ElectricianId) -> Result<u32, AppError> {
        let local_index = self.store.owner_status_index(owner).await?;
        let remote_statuses = self.remote.fetch_status_list().await?;

        let local: HashMap<ApplicationId, LifecycleStatus> = local_index.into_iter().collect();

        // A difference is a remote id we do not have, or one whose status
        // moved. Ids absent locally still go through the correction write
        // and match zero rows; the remote listing is not owner-scoped.
        let differences: Vec<RemoteStatus> = remote_statuses
            .into_iter()
            .filter(|remote| local.get(&remote.application_id) != Some(&remote.status))
            .collect();

        if differences.is_empty() {
            debug!(owner = %owner, "Local statuses already match the remote");
            return Ok(0);
        }

        debug!(
            owner = %owner,
            differences = differences.len(),
            "Applying remote status corrections"
        );

        let corrections = differences.iter().map(|difference| {
            self.store.apply_remote_correction(
                &difference.application_id,
                difference.status,
                difference.remarks.as_deref(),
            )
        });

        let mut matched = 0u32;
        for result in join_all(corrections).await {
            if result? {
                matched += 1;
            }
        }

        info!(owner = %owner, corrections = matched, "Status reconciliation finished");
        Ok(matched)
    }
}
