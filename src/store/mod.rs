//! Website persistence and deduplication
//!
//! The store owns the real "one record per hostname" invariant: `insert`
//! refuses a second record for the same canonical hostname. The gateway's
//! lookup before inserting only saves a write in the common case.

mod json;

pub use json::JsonWebsiteStore;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::types::{NewWebsite, WebsiteRecord};

/// Errors raised by a website store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A website with hostname '{0}' already exists")]
    DuplicateHostname(String),
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Document store holding website records
#[async_trait]
pub trait WebsiteStore: Send + Sync {
    /// Find the record whose hostname equals `hostname`, ignoring case
    async fn find_by_hostname(&self, hostname: &str) -> Result<Option<WebsiteRecord>, StoreError>;

    /// Insert a new record, assigning its id and timestamps.
    ///
    /// Fails with [`StoreError::DuplicateHostname`] if the hostname is taken.
    async fn insert(&self, website: NewWebsite) -> Result<WebsiteRecord, StoreError>;

    /// All records, oldest first
    async fn list(&self) -> Result<Vec<WebsiteRecord>, StoreError>;

    /// Number of stored records
    async fn len(&self) -> Result<usize, StoreError>;
}

/// Outcome of [`WebsiteGateway::check_and_store`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    /// The candidate was new and has been persisted
    Stored(WebsiteRecord),
    /// A record for the hostname already exists; nothing was written
    Conflict,
}

/// Dedup check followed by insert
#[derive(Clone)]
pub struct WebsiteGateway {
    store: Arc<dyn WebsiteStore>,
}

impl WebsiteGateway {
    pub fn new(store: Arc<dyn WebsiteStore>) -> Self {
        Self { store }
    }

    /// Store `candidate` unless its hostname is already recorded.
    ///
    /// Existing records are never touched. A concurrent request that wins the
    /// race between the lookup and the insert also yields `Conflict`.
    pub async fn check_and_store(&self, candidate: NewWebsite) -> Result<StoreOutcome, StoreError> {
        if self
            .store
            .find_by_hostname(&candidate.hostname)
            .await?
            .is_some()
        {
            debug!("Website {} already recorded", candidate.hostname);
            return Ok(StoreOutcome::Conflict);
        }

        match self.store.insert(candidate).await {
            Ok(record) => {
                info!("Stored website {} ({})", record.hostname, record.id);
                Ok(StoreOutcome::Stored(record))
            }
            Err(StoreError::DuplicateHostname(hostname)) => {
                debug!("Website {} recorded concurrently", hostname);
                Ok(StoreOutcome::Conflict)
            }
            Err(e) => Err(e),
        }
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn WebsiteStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(hostname: &str) -> NewWebsite {
        NewWebsite::new("Title", "Description", format!("http://{}", hostname), hostname)
    }

    #[tokio::test]
    async fn test_check_and_store_then_conflict() {
        let store = Arc::new(JsonWebsiteStore::in_memory());
        let gateway = WebsiteGateway::new(store.clone());

        let first = gateway.check_and_store(candidate("example.com")).await.unwrap();
        let StoreOutcome::Stored(record) = first else {
            panic!("expected the first website to be stored");
        };
        assert_eq!(record.hostname, "example.com");

        let second = gateway.check_and_store(candidate("EXAMPLE.com")).await.unwrap();
        assert_eq!(second, StoreOutcome::Conflict);
        assert_eq!(store.len().await.unwrap(), 1);

        // The original record is untouched
        let stored = store.find_by_hostname("example.com").await.unwrap().unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_store_one_record() {
        let store = Arc::new(JsonWebsiteStore::in_memory());
        let gateway = WebsiteGateway::new(store.clone());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let gateway = gateway.clone();
                tokio::spawn(async move { gateway.check_and_store(candidate("race.dev")).await })
            })
            .collect();

        let mut stored = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                StoreOutcome::Stored(_) => stored += 1,
                StoreOutcome::Conflict => conflicts += 1,
            }
        }

        assert_eq!(stored, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(store.len().await.unwrap(), 1);
    }
}
