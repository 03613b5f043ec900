pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod state;

pub use application::services::{
    ApplicationService, ReconcileOutcome, StatusReconciler, SyncService, UploadOutcome,
    UploadSynchronizer,
};
pub use domain::entities::{ApplicationImage, MeteringApplication, SyncCounts, UploadReport};
pub use domain::value_objects::{
    ApplicationId, ElectricianId, FieldMap, ImageKind, LifecycleStatus, SyncStatus,
};
pub use infrastructure::database::{ConnectionPool, SqliteApplicationStore};
pub use infrastructure::remote::HttpRemoteGateway;
pub use infrastructure::storage::LocalImageFiles;
pub use shared::config::AppConfig;
pub use shared::error::{AppError, Result};
pub use state::AppContext;

pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metersync=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
