use crate::utils::validation::sanitize_download_name;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Flat key/value store for generated images, keyed by filename.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Stores `data` under `filename`, replacing any previous content.
    async fn put(&self, filename: &str, data: &[u8]) -> Result<()>;
    async fn get(&self, filename: &str) -> Result<Vec<u8>>;
    async fn exists(&self, filename: &str) -> Result<bool>;
    /// Confirms the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}

/// Stores files in a single directory on the local filesystem.
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf> {
        let name = sanitize_download_name(filename).map_err(|e| anyhow!(e))?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn put(&self, filename: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(filename)?;

        // Write next to the target and rename so readers never see a partial file
        let tmp_path = self
            .root
            .join(format!(".{}.{}.tmp", filename, Uuid::new_v4()));

        let write = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(data).await?;
            file.sync_all().await?;
            tokio::fs::rename(&tmp_path, &path).await
        };

        if let Err(e) = write.await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e).with_context(|| format!("Failed to write {}", path.display()));
        }

        Ok(())
    }

    async fn get(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.resolve(filename)?;
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    async fn exists(&self, filename: &str) -> Result<bool> {
        let path = self.resolve(filename)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    async fn ping(&self) -> Result<()> {
        let meta = tokio::fs::metadata(&self.root)
            .await
            .with_context(|| format!("Storage root {} unavailable", self.root.display()))?;
        if !meta.is_dir() {
            return Err(anyhow!("Storage root {} is not a directory", self.root.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(dir.path());

        storage.put("qrcode_1.png", b"image-bytes").await.unwrap();
        assert_eq!(storage.get("qrcode_1.png").await.unwrap(), b"image-bytes");
        assert!(storage.exists("qrcode_1.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(dir.path());

        storage.put("same.png", b"first").await.unwrap();
        storage.put("same.png", b"second").await.unwrap();
        assert_eq!(storage.get("same.png").await.unwrap(), b"second");

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(dir.path());

        assert!(storage.get("missing.png").await.is_err());
        assert!(!storage.exists("missing.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_paths_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(dir.path().join("inner"));
        std::fs::create_dir(dir.path().join("inner")).unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"secret").unwrap();

        assert!(storage.get("../secret.txt").await.is_err());
        assert!(storage.put("../escape.png", b"x").await.is_err());
        assert!(!dir.path().join("escape.png").exists());
    }

    #[tokio::test]
    async fn test_put_into_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(dir.path().join("does-not-exist"));

        assert!(storage.put("a.png", b"x").await.is_err());
        assert!(storage.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_ping() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(dir.path());
        assert!(storage.ping().await.is_ok());
    }
}
