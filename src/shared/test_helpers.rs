#[cfg(test)]
use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use crate::core::error::Result;
#[cfg(test)]
use crate::modules::storage::{MediaFolder, MediaStore, StoredFile};

/// Media store that records release calls instead of touching any backend.
/// Lets service tests assert which attachments were (not) released.
#[cfg(test)]
pub struct RecordingStore {
    releases: Mutex<Vec<String>>,
    sequence: AtomicU64,
}

#[cfg(test)]
impl RecordingStore {
    pub fn new() -> Self {
        Self {
            releases: Mutex::new(Vec::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// URLs released so far, in call order
    pub fn released(&self) -> Vec<String> {
        self.releases.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl MediaStore for RecordingStore {
    async fn store(
        &self,
        folder: MediaFolder,
        original_filename: &str,
        _content_type: &str,
        _data: Vec<u8>,
    ) -> Result<StoredFile> {
        // Distinct key per call, like the real backends
        let n = self.sequence.fetch_add(1, Ordering::Relaxed);
        let key = format!("{}/{}-{}", folder.dir(), n, original_filename);
        Ok(StoredFile {
            url: format!("https://media.test/{}", key),
            key,
        })
    }

    async fn release(&self, url: &str, _key: Option<&str>) -> Result<()> {
        self.releases.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
