//! Media storage backends for uploaded files.
//!
//! Every media-attached record (product image, quotation PDF, blog image)
//! goes through the [`MediaStore`] trait. Two implementations exist, selected
//! at startup by configuration: [`LocalStore`] writes to a directory served
//! statically by the router, [`S3Store`] talks to an S3-compatible object
//! store. Callers never care which one they got.

mod local;
mod s3;

pub use local::LocalStore;
pub use s3::S3Store;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::Result;

/// Folder class an upload belongs to. Determines the storage subdirectory /
/// key prefix and the filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    ProductImages,
    QuotationDocuments,
    BlogImages,
}

impl MediaFolder {
    /// Subdirectory (local) or key prefix (S3) for this folder class.
    pub fn dir(self) -> &'static str {
        match self {
            MediaFolder::ProductImages => "products",
            MediaFolder::QuotationDocuments => "quotations",
            MediaFolder::BlogImages => "blog",
        }
    }

    fn file_prefix(self) -> &'static str {
        match self {
            MediaFolder::ProductImages => "product",
            MediaFolder::QuotationDocuments => "quotation",
            MediaFolder::BlogImages => "post",
        }
    }
}

/// Reference to a stored file: the publicly resolvable URL plus the
/// store-relative key needed to delete the object later.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub url: String,
    pub key: String,
}

/// Backend-neutral media store.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist `data` under a collision-resistant name in the given folder
    /// class and return its reference.
    async fn store(
        &self,
        folder: MediaFolder,
        original_filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<StoredFile>;

    /// Delete the object behind `url` if this store owns it.
    ///
    /// References pointing elsewhere (other hosts, pre-migration URLs) and
    /// already-missing objects succeed silently; only real deletion failures
    /// are errors.
    async fn release(&self, url: &str, key: Option<&str>) -> Result<()>;
}

/// Best-effort release: failures are logged and never propagated. Used when
/// replacing or removing a record's attachment, where deleting the old file
/// must not block the row mutation that already happened.
pub async fn release_quietly(store: &dyn MediaStore, url: &str, key: Option<&str>) {
    if let Err(e) = store.release(url, key).await {
        tracing::warn!(url = url, "Failed to release old attachment: {}", e);
    }
}

/// File extension for a content type, falling back to the original filename.
fn extension_for<'a>(content_type: &str, original_filename: &'a str) -> &'a str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "application/pdf" => "pdf",
        _ => original_filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or("bin"),
    }
}

/// Collision-resistant filename: folder-class prefix, millisecond timestamp
/// and a random token, e.g. `product_1714321098765_9f2c81aa.png`.
pub fn unique_filename(folder: MediaFolder, original_filename: &str, content_type: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}.{}",
        folder.file_prefix(),
        Utc::now().timestamp_millis(),
        &token[..8],
        extension_for(content_type, original_filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_filename_carries_prefix_and_extension() {
        let name = unique_filename(MediaFolder::ProductImages, "photo.PNG", "image/png");
        assert!(name.starts_with("product_"));
        assert!(name.ends_with(".png"));

        let name = unique_filename(MediaFolder::QuotationDocuments, "q.pdf", "application/pdf");
        assert!(name.starts_with("quotation_"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn unique_filename_differs_between_calls() {
        let a = unique_filename(MediaFolder::BlogImages, "a.jpg", "image/jpeg");
        let b = unique_filename(MediaFolder::BlogImages, "a.jpg", "image/jpeg");
        assert_ne!(a, b);
    }

    #[test]
    fn extension_falls_back_to_filename() {
        assert_eq!(extension_for("application/zip", "archive.zip"), "zip");
        assert_eq!(extension_for("application/octet-stream", "blob"), "bin");
    }
}
