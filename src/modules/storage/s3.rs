//! S3-compatible media backend (MinIO, R2, AWS S3).
//!
//! Uses rust-s3 with path-style URLs. The bucket is created at startup if it
//! does not exist; public read access on the bucket is a provisioning
//! concern, not handled here.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info, warn};

use crate::core::config::S3Config;
use crate::core::error::{AppError, Result};
use crate::modules::storage::{unique_filename, MediaFolder, MediaStore, StoredFile};

pub struct S3Store {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
}

impl S3Store {
    pub fn new(config: S3Config) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Storage(format!("Failed to create S3 credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Storage(format!("Failed to create S3 bucket handle: {}", e)))?;

        // Path-style URLs (http://endpoint/bucket) for MinIO compatibility
        bucket.set_path_style();

        Ok(Self {
            bucket,
            region,
            credentials,
            endpoint: config.endpoint,
            public_endpoint: config.public_endpoint,
        })
    }

    /// Ensure the bucket exists, create if not.
    pub async fn ensure_bucket_exists(&self) -> Result<()> {
        let bucket_config = BucketConfiguration::default();

        match Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            bucket_config,
        )
        .await
        {
            Ok(_) => {
                info!("Bucket '{}' created", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                    Ok(())
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                    Ok(())
                }
            }
        }
    }

    /// Public URL for an object key.
    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key)
    }

    /// Object key for a URL this store owns, if any.
    fn key_from_url(&self, url: &str) -> Option<String> {
        let public_prefix = format!("{}/{}/", self.public_endpoint, self.bucket.name());
        if let Some(key) = url.strip_prefix(&public_prefix) {
            return Some(key.to_string());
        }

        let internal_prefix = format!("{}/{}/", self.endpoint, self.bucket.name());
        url.strip_prefix(&internal_prefix).map(|k| k.to_string())
    }
}

#[async_trait]
impl MediaStore for S3Store {
    async fn store(
        &self,
        folder: MediaFolder,
        original_filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<StoredFile> {
        let name = unique_filename(folder, original_filename, content_type);
        let key = format!("{}/{}", folder.dir(), name);

        self.bucket
            .put_object_with_content_type(&key, &data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload '{}': {}", key, e)))?;

        debug!(key = %key, bucket = %self.bucket.name(), "Uploaded file to object store");

        Ok(StoredFile {
            url: self.public_url(&key),
            key,
        })
    }

    async fn release(&self, url: &str, key: Option<&str>) -> Result<()> {
        let key = match key
            .map(|k| k.to_string())
            .or_else(|| self.key_from_url(url))
        {
            Some(k) => k,
            None => {
                debug!(url = url, "Skipping release of foreign reference");
                return Ok(());
            }
        };

        match self.bucket.delete_object(&key).await {
            Ok(_) => {
                debug!(key = %key, "Deleted object from store");
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                // Already gone counts as released.
                if error_str.contains("404") || error_str.contains("NoSuchKey") {
                    Ok(())
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to delete '{}': {}",
                        key, e
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> S3Store {
        S3Store::new(S3Config {
            endpoint: "http://localhost:9000".to_string(),
            public_endpoint: "https://media.vidrioalarte.com".to_string(),
            access_key: "test".to_string(),
            secret_key: "test".to_string(),
            bucket: "media".to_string(),
            region: "us-east-1".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn public_url_uses_public_endpoint() {
        let store = test_store();
        assert_eq!(
            store.public_url("products/product_1_abcd.png"),
            "https://media.vidrioalarte.com/media/products/product_1_abcd.png"
        );
    }

    #[test]
    fn key_from_url_matches_both_endpoints() {
        let store = test_store();
        assert_eq!(
            store
                .key_from_url("https://media.vidrioalarte.com/media/blog/post_1_abcd.jpg")
                .as_deref(),
            Some("blog/post_1_abcd.jpg")
        );
        assert_eq!(
            store
                .key_from_url("http://localhost:9000/media/blog/post_1_abcd.jpg")
                .as_deref(),
            Some("blog/post_1_abcd.jpg")
        );
        assert_eq!(store.key_from_url("https://elsewhere.example/img.png"), None);
    }
}
