use crate::application::services::{ApplicationService, SyncService};
use crate::domain::value_objects::ElectricianId;
use crate::infrastructure::database::{ConnectionPool, SqliteApplicationStore};
use crate::infrastructure::remote::HttpRemoteGateway;
use crate::infrastructure::storage::LocalImageFiles;
use crate::shared::config::AppConfig;
use crate::shared::error::{AppError, Result};
use std::sync::Arc;
use tracing::info;

/// Everything a running process needs, wired once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub pool: ConnectionPool,
    pub applications: Arc<ApplicationService>,
    pub sync: Arc<SyncService>,
}

impl AppContext {
    pub async fn new(config: AppConfig) -> Result<Self> {
        config.validate().map_err(AppError::Configuration)?;

        let pool = ConnectionPool::new(&config.database).await?;
        pool.migrate().await?;

        let files = Arc::new(LocalImageFiles::new());
        let store = Arc::new(SqliteApplicationStore::new(pool.clone(), files.clone()));
        let remote = Arc::new(HttpRemoteGateway::new(&config.remote)?);

        let applications = Arc::new(ApplicationService::new(store.clone()));
        let sync = Arc::new(SyncService::new(store, remote, files));

        info!("Application context initialized");

        Ok(Self {
            config,
            pool,
            applications,
            sync,
        })
    }

    /// Spawns the periodic sync loop when auto sync is enabled.
    pub fn start_auto_sync(&self, owner: ElectricianId) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.sync.auto_sync {
            return None;
        }
        Some(self.sync.schedule(owner, self.config.sync.sync_interval))
    }

    pub async fn shutdown(&self) {
        self.pool.close().await;
    }
}
