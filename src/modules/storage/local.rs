//! Local filesystem media backend.
//!
//! Files land under `{root}/{folder}/{name}` and are served statically by the
//! router at `/uploads/{folder}/{name}`, so the public URL is built from the
//! configured base URL.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::config::LocalStorageConfig;
use crate::core::error::{AppError, Result};
use crate::modules::storage::{unique_filename, MediaFolder, MediaStore, StoredFile};

pub struct LocalStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStore {
    pub fn new(config: LocalStorageConfig) -> Self {
        Self {
            root: config.root,
            public_base_url: config.public_base_url,
        }
    }

    /// The directory served statically under `/uploads`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn url_prefix(&self) -> String {
        format!("{}/uploads/", self.public_base_url)
    }

    /// Store-relative key for a URL this backend owns, if any.
    fn key_from_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.url_prefix()).map(|k| k.to_string())
    }
}

#[async_trait]
impl MediaStore for LocalStore {
    async fn store(
        &self,
        folder: MediaFolder,
        original_filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<StoredFile> {
        let name = unique_filename(folder, original_filename, content_type);
        let key = format!("{}/{}", folder.dir(), name);
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(&path, &data).await.map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!(key = %key, size = data.len(), "Stored file on local disk");

        Ok(StoredFile {
            url: format!("{}{}", self.url_prefix(), key),
            key,
        })
    }

    async fn release(&self, url: &str, key: Option<&str>) -> Result<()> {
        // Only touch files this server actually owns; anything else (external
        // image URLs, references from another deployment) is left alone.
        if !url.starts_with(&self.url_prefix()) {
            tracing::debug!(url = url, "Skipping release of foreign reference");
            return Ok(());
        }

        let key = match key.map(|k| k.to_string()).or_else(|| self.key_from_url(url)) {
            Some(k) => k,
            None => return Ok(()),
        };

        // A stored key never leaves the uploads root.
        if key.contains("..") {
            return Err(AppError::Storage(format!("Refusing to delete '{}'", key)));
        }

        let path = self.root.join(&key);
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key = %key, "Deleted file from local disk");
                Ok(())
            }
            // Already gone counts as released.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_store() -> (LocalStore, PathBuf) {
        let root = std::env::temp_dir().join(format!("vidrioarte-test-{}", Uuid::new_v4()));
        let store = LocalStore::new(LocalStorageConfig {
            root: root.clone(),
            public_base_url: "http://localhost:3000".to_string(),
        });
        (store, root)
    }

    #[tokio::test]
    async fn store_then_release_roundtrip() {
        let (store, root) = test_store();

        let stored = store
            .store(
                MediaFolder::ProductImages,
                "panel.png",
                "image/png",
                b"png-bytes".to_vec(),
            )
            .await
            .unwrap();

        assert!(stored.url.starts_with("http://localhost:3000/uploads/products/"));
        assert!(stored.key.starts_with("products/"));
        assert_eq!(fs::read(root.join(&stored.key)).await.unwrap(), b"png-bytes");

        store.release(&stored.url, Some(&stored.key)).await.unwrap();
        assert!(!root.join(&stored.key).exists());

        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn release_missing_file_is_ok() {
        let (store, root) = test_store();
        store
            .release(
                "http://localhost:3000/uploads/products/product_0_dead.png",
                None,
            )
            .await
            .unwrap();
        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn release_foreign_url_is_noop() {
        let (store, root) = test_store();
        store
            .release("https://cdn.example.com/some/image.png", None)
            .await
            .unwrap();
        let _ = fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn release_rejects_path_traversal() {
        let (store, root) = test_store();
        let result = store
            .release(
                "http://localhost:3000/uploads/../../etc/passwd",
                None,
            )
            .await;
        assert!(result.is_err());
        let _ = fs::remove_dir_all(&root).await;
    }
}
