//! One-time persistence backend selection
//!
//! The backend is chosen exactly once at process start and injected as an
//! explicitly passed handle; nothing else in the application branches on
//! the storage mode.

use std::sync::Arc;

use tracing::info;

use cassava_persistence::{
    EmbeddedPersistService, ExternalDbPersistService, PersistenceService, StorageMode,
};

use crate::config::Configuration;

/// Construct the persistence service for the configured storage mode
pub async fn connect(configuration: &Configuration) -> anyhow::Result<Arc<dyn PersistenceService>> {
    let storage_mode = configuration.storage_mode();
    info!("Persistence mode: {}", storage_mode);

    match storage_mode {
        StorageMode::ExternalDb => {
            let db = configuration.database_connection().await?;
            Ok(Arc::new(ExternalDbPersistService::new(db)))
        }
        StorageMode::Embedded => {
            let data_dir = configuration.embedded_data_dir();
            info!("Initializing embedded storage at: {}", data_dir);
            let service = EmbeddedPersistService::open(&data_dir)?;
            Ok(Arc::new(service))
        }
    }
}
