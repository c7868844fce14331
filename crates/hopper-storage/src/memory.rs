use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use hopper_core::repository::Result;
use hopper_core::{
    ClickEvent, ReadRepository, Repository, ShortCode, StorageError, UrlRecord, Validity,
};
use jiff::Timestamp;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::trace;

/// In-memory storage entry for a URL mapping.
///
/// Everything but the click log is immutable once inserted, so only the
/// log sits behind a lock.
#[derive(Debug)]
struct StoredRecord {
    code: ShortCode,
    target_url: String,
    created_at: Timestamp,
    validity: Validity,
    expires_at: Timestamp,
    clicks: Mutex<Vec<ClickEvent>>,
}

impl StoredRecord {
    fn from_record(record: UrlRecord) -> Self {
        Self {
            code: record.code,
            target_url: record.target_url,
            created_at: record.created_at,
            validity: record.validity,
            expires_at: record.expires_at,
            clicks: Mutex::new(record.clicks),
        }
    }

    fn snapshot(&self) -> UrlRecord {
        UrlRecord {
            code: self.code.clone(),
            target_url: self.target_url.clone(),
            created_at: self.created_at,
            validity: self.validity,
            expires_at: self.expires_at,
            clicks: self.clicks.lock().clone(),
        }
    }
}

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap shards its locks, so operations on codes in different shards
/// never block each other. Shard locks are only held long enough to look up
/// or insert an `Arc<StoredRecord>`; click appends then lock the record's own
/// log, which keeps appends to one code from stalling another.
///
/// Records are never evicted, expired or not.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, Arc<StoredRecord>>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    fn lookup(&self, code: &ShortCode) -> Option<Arc<StoredRecord>> {
        // Clone the Arc out so the shard guard is released immediately.
        self.storage
            .get(code.as_str())
            .map(|entry| Arc::clone(entry.value()))
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self.lookup(code).map(|record| record.snapshot()))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, record: UrlRecord) -> Result<()> {
        let key = record.code.as_str().to_owned();

        // The entry API holds the shard write lock across the check and the insert.
        match self.storage.entry(key) {
            Entry::Occupied(occupied) => {
                trace!(code = %occupied.key(), "insert rejected, code already taken");
                Err(StorageError::Conflict(occupied.key().clone()))
            }
            Entry::Vacant(vacant) => {
                trace!(code = %record.code, "inserting record");
                vacant.insert(Arc::new(StoredRecord::from_record(record)));
                Ok(())
            }
        }
    }

    async fn append_click(&self, code: &ShortCode, event: ClickEvent) -> Result<()> {
        let Some(record) = self.lookup(code) else {
            return Err(StorageError::NotFound(code.to_string()));
        };

        record.clicks.lock().push(event);
        Ok(())
    }
}
