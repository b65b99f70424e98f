//! Storage setup and initialization

use anyhow::Result;
use formular_core::{Config, StorageBackend};
use formular_storage::{create_storage, Storage};
use std::sync::Arc;

/// Setup the storage backend from configuration
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).await?;
    let backend_type = storage.backend_type();

    match backend_type {
        StorageBackend::S3 => {
            tracing::info!(
                backend = ?backend_type,
                bucket = config.s3_bucket(),
                "Storage abstraction initialized successfully"
            );
        }
        StorageBackend::Local => {
            tracing::info!(
                backend = ?backend_type,
                path = config.local_storage_path().unwrap_or_default(),
                "Storage abstraction initialized successfully"
            );
        }
    }

    Ok(storage)
}
