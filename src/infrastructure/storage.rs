use crate::config::AppConfig;
use crate::services::storage::LocalStorageService;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &AppConfig) -> Result<Arc<LocalStorageService>> {
    let root = &config.storage_dir;

    tokio::fs::create_dir_all(root)
        .await
        .with_context(|| format!("Failed to create storage directory {}", root.display()))?;

    info!("📁 Local storage: {}", root.display());

    Ok(Arc::new(LocalStorageService::new(root.clone())))
}
