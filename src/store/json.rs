//! JSON-file-backed website store
//!
//! Records live in memory, keyed by lowercase hostname. When a path is
//! configured the whole set is rewritten to disk after every insert.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::{StoreError, WebsiteStore};
use crate::types::{NewWebsite, WebsiteRecord};

const STORE_VERSION: u32 = 1;

/// On-disk layout
#[derive(Serialize, Deserialize)]
struct SavedStore {
    version: u32,
    websites: Vec<WebsiteRecord>,
}

/// Website store persisted as a single JSON document
pub struct JsonWebsiteStore {
    /// Lowercase hostname to record
    records: RwLock<HashMap<String, WebsiteRecord>>,
    /// Backing file, `None` for a purely in-memory store
    path: Option<PathBuf>,
    /// Held across insert, file rewrite and rollback, so no other snapshot
    /// can capture a record that is later rolled back
    save_lock: Mutex<()>,
}

impl JsonWebsiteStore {
    /// Create a store that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            path: None,
            save_lock: Mutex::new(()),
        }
    }

    /// Open the store at `path`, loading existing records if the file exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut records = HashMap::new();
        if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            let saved: SavedStore = serde_json::from_str(&data)?;

            for record in saved.websites {
                let key = record.hostname.to_lowercase();
                if records.contains_key(&key) {
                    warn!("Ignoring duplicate stored record for {}", record.hostname);
                    continue;
                }
                records.insert(key, record);
            }

            info!("Loaded website store with {} records", records.len());
        }

        Ok(Self {
            records: RwLock::new(records),
            path: Some(path),
            save_lock: Mutex::new(()),
        })
    }

    /// Backing file path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn snapshot(&self) -> Vec<WebsiteRecord> {
        let mut websites: Vec<WebsiteRecord> = self.records.read().values().cloned().collect();
        websites.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.hostname.cmp(&b.hostname))
        });
        websites
    }

    /// Rewrite the backing file atomically (temp file, then rename).
    ///
    /// Callers hold `save_lock`, so snapshots reach the disk in lock order.
    async fn write_file(&self) -> Result<(), StoreError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };

        let saved = SavedStore {
            version: STORE_VERSION,
            websites: self.snapshot(),
        };
        let data = serde_json::to_vec_pretty(&saved)?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, data).await?;
        tokio::fs::rename(&tmp_path, path).await?;

        Ok(())
    }
}

#[async_trait]
impl WebsiteStore for JsonWebsiteStore {
    async fn find_by_hostname(&self, hostname: &str) -> Result<Option<WebsiteRecord>, StoreError> {
        Ok(self.records.read().get(&hostname.to_lowercase()).cloned())
    }

    async fn insert(&self, website: NewWebsite) -> Result<WebsiteRecord, StoreError> {
        let key = website.hostname_key();
        let _guard = self.save_lock.lock().await;

        let record = {
            let mut records = self.records.write();
            if records.contains_key(&key) {
                return Err(StoreError::DuplicateHostname(website.hostname));
            }
            let record = website.into_record(Utc::now());
            records.insert(key.clone(), record.clone());
            record
        };

        if let Err(e) = self.write_file().await {
            // Keep memory consistent with what is on disk
            self.records.write().remove(&key);
            return Err(e);
        }

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<WebsiteRecord>, StoreError> {
        Ok(self.snapshot())
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn website(hostname: &str) -> NewWebsite {
        NewWebsite::new("Title", "Description", format!("https://{}/", hostname), hostname)
            .with_keywords(vec!["rust".to_string(), "cargo".to_string()])
    }

    #[tokio::test]
    async fn test_insert_assigns_identity_and_timestamps() {
        let store = JsonWebsiteStore::in_memory();
        let record = store.insert(website("example.com")).await.unwrap();

        assert_eq!(record.hostname, "example.com");
        assert_eq!(record.keywords, vec!["rust", "cargo"]);
        assert_eq!(record.created_at, record.updated_at);
        assert!(store.path().is_none());
    }

    #[tokio::test]
    async fn test_hostname_is_unique_ignoring_case() {
        let store = JsonWebsiteStore::in_memory();
        store.insert(website("example.com")).await.unwrap();

        let err = store.insert(website("Example.COM")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateHostname(_)));
        assert_eq!(store.len().await.unwrap(), 1);

        let found = store.find_by_hostname("EXAMPLE.com").await.unwrap();
        assert_eq!(found.unwrap().hostname, "example.com");
        assert!(store.find_by_hostname("other.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persists_and_reloads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("websites.json");

        {
            let store = JsonWebsiteStore::open(&path).unwrap();
            store.insert(website("one.com")).await.unwrap();
            store.insert(website("two.com")).await.unwrap();
        }

        assert!(path.exists());

        let reopened = JsonWebsiteStore::open(&path).unwrap();
        assert_eq!(reopened.len().await.unwrap(), 2);

        let list = reopened.list().await.unwrap();
        let hostnames: Vec<&str> = list.iter().map(|r| r.hostname.as_str()).collect();
        assert!(hostnames.contains(&"one.com"));
        assert!(hostnames.contains(&"two.com"));

        // Uniqueness survives a reload
        assert!(matches!(
            reopened.insert(website("ONE.com")).await,
            Err(StoreError::DuplicateHostname(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back_insert() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("data");
        let path = dir.join("websites.json");
        let store = JsonWebsiteStore::open(&path).unwrap();

        // Writes fail once the directory is gone
        std::fs::remove_dir(&dir).unwrap();
        let err = store.insert(website("example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(store.len().await.unwrap(), 0);
        assert!(store.find_by_hostname("example.com").await.unwrap().is_none());

        // A retry for the same host stores exactly one record
        std::fs::create_dir_all(&dir).unwrap();
        store.insert(website("example.com")).await.unwrap();

        let data = std::fs::read_to_string(&path).unwrap();
        let saved: SavedStore = serde_json::from_str(&data).unwrap();
        assert_eq!(saved.websites.len(), 1);
        assert_eq!(saved.websites[0].hostname, "example.com");
    }

    #[tokio::test]
    async fn test_concurrent_inserts_all_reach_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("websites.json");
        let store = std::sync::Arc::new(JsonWebsiteStore::open(&path).unwrap());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(website(&format!("site{}.com", i))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let reopened = JsonWebsiteStore::open(&path).unwrap();
        assert_eq!(reopened.len().await.unwrap(), 16);
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("websites.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            JsonWebsiteStore::open(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
