pub mod auth;
pub mod config;
pub mod crypto;
pub mod models;
pub mod monitoring;
pub mod storage;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for embedders that don't install their own subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::info!("Cardea core starting v{}", config::APP_VERSION);
}

/// Build the default monitoring session for an unlocked account: SQLite
/// vault at the app data path, clinical reference bands, and the bundled
/// severity model.
pub async fn open_session(
    account: std::sync::Arc<auth::AccountSession>,
) -> Result<monitoring::MonitoringSession, SetupError> {
    std::fs::create_dir_all(config::app_data_dir()).map_err(storage::StorageError::Io)?;
    let store = storage::SqliteStore::open(&config::vault_db_path())?;
    let vault = account.open_vault(Box::new(store));
    let classifier = monitoring::Classifier::with_model(
        monitoring::VitalReference::default_bands(),
        Box::new(monitoring::NearestCentroidModel::bundled()),
    );
    let session = monitoring::MonitoringSession::start(account, vault, classifier).await?;
    Ok(session)
}

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Monitoring error: {0}")]
    Monitoring(#[from] monitoring::MonitoringError),
}
