use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use review_feed_models::{review_key, ApprovalRecord};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("approval store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("approval store holds invalid json: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Store of manager approve/reject decisions, keyed by listing and review.
///
/// Writes are last-write-wins upserts; there is no delete, a rejection is
/// an upsert with `approved: false`.
#[async_trait]
pub trait ApprovalStore: Send + Sync {
    async fn load_all(&self) -> Result<Vec<ApprovalRecord>, StoreError>;
    async fn list_by_listing(&self, listing_id: i64) -> Result<Vec<ApprovalRecord>, StoreError>;
    async fn upsert(&self, record: ApprovalRecord) -> Result<(), StoreError>;
    async fn is_approved(&self, listing_id: i64, review_id: &str) -> Result<bool, StoreError>;
}

/// JSON-file backed store. The file is a flat array of records and is
/// created on first write; a missing file reads as empty, a corrupt one is
/// an error rather than silent data loss.
pub struct FileApprovalStore {
    path: PathBuf,
    // Serializes the read-modify-write cycle of concurrent upserts
    write_lock: Mutex<()>,
}

impl FileApprovalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_records(&self) -> Result<Vec<ApprovalRecord>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_records(&self, records: &[ApprovalRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl ApprovalStore for FileApprovalStore {
    async fn load_all(&self) -> Result<Vec<ApprovalRecord>, StoreError> {
        self.read_records().await
    }

    async fn list_by_listing(&self, listing_id: i64) -> Result<Vec<ApprovalRecord>, StoreError> {
        let all = self.read_records().await?;
        Ok(all
            .into_iter()
            .filter(|record| record.listing_id == listing_id)
            .collect())
    }

    async fn upsert(&self, record: ApprovalRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await?;
        let existing = records.iter_mut().find(|candidate| {
            candidate.listing_id == record.listing_id && candidate.review_id == record.review_id
        });
        match existing {
            Some(slot) => *slot = record,
            None => records.push(record),
        }
        self.write_records(&records).await
    }

    async fn is_approved(&self, listing_id: i64, review_id: &str) -> Result<bool, StoreError> {
        let all = self.read_records().await?;
        Ok(all.iter().any(|record| {
            record.listing_id == listing_id && record.review_id == review_id && record.approved
        }))
    }
}

/// Process-local store; decisions vanish on restart.
#[derive(Default)]
pub struct MemoryApprovalStore {
    records: Mutex<HashMap<String, ApprovalRecord>>,
}

impl MemoryApprovalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApprovalStore for MemoryApprovalStore {
    async fn load_all(&self) -> Result<Vec<ApprovalRecord>, StoreError> {
        Ok(self.records.lock().await.values().cloned().collect())
    }

    async fn list_by_listing(&self, listing_id: i64) -> Result<Vec<ApprovalRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .await
            .values()
            .filter(|record| record.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, record: ApprovalRecord) -> Result<(), StoreError> {
        let key = review_key(record.listing_id, &record.review_id);
        self.records.lock().await.insert(key, record);
        Ok(())
    }

    async fn is_approved(&self, listing_id: i64, review_id: &str) -> Result<bool, StoreError> {
        let key = review_key(listing_id, review_id);
        Ok(self
            .records
            .lock()
            .await
            .get(&key)
            .map(|record| record.approved)
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn create_record(listing_id: i64, review_id: &str, approved: bool) -> ApprovalRecord {
        ApprovalRecord {
            listing_id,
            review_id: review_id.to_string(),
            approved,
            approved_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_file_store_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path().join("approvals.json"));
        assert!(store.load_all().await.unwrap().is_empty());
        assert!(!store.is_approved(100, "7453").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_creates_parent_directories_on_first_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("approvals.json");
        let store = FileApprovalStore::new(path.clone());

        store.upsert(create_record(100, "7453", true)).await.unwrap();

        assert!(path.exists());
        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_store_upsert_replaces_matching_record() {
        let dir = tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path().join("approvals.json"));

        store.upsert(create_record(100, "7453", true)).await.unwrap();
        store.upsert(create_record(100, "7453", false)).await.unwrap();
        store.upsert(create_record(100, "8101", true)).await.unwrap();

        let all = store.load_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(!store.is_approved(100, "7453").await.unwrap());
        assert!(store.is_approved(100, "8101").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_survives_reopening() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("approvals.json");

        FileApprovalStore::new(path.clone())
            .upsert(create_record(200, "8201", true))
            .await
            .unwrap();

        let reopened = FileApprovalStore::new(path);
        assert!(reopened.is_approved(200, "8201").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_scopes_listing_queries() {
        let dir = tempdir().unwrap();
        let store = FileApprovalStore::new(dir.path().join("approvals.json"));

        store.upsert(create_record(100, "7453", true)).await.unwrap();
        store.upsert(create_record(200, "8201", true)).await.unwrap();
        store.upsert(create_record(100, "8101", false)).await.unwrap();

        let listing = store.list_by_listing(100).await.unwrap();
        assert_eq!(listing.len(), 2);
        assert!(listing.iter().all(|record| record.listing_id == 100));

        // Same review id under another listing is a different decision
        assert!(!store.is_approved(200, "7453").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_corrupt_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("approvals.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = FileApprovalStore::new(path);
        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_memory_store_upserts_and_lists() {
        let store = MemoryApprovalStore::new();

        store.upsert(create_record(100, "7453", true)).await.unwrap();
        store.upsert(create_record(100, "7453", false)).await.unwrap();
        store.upsert(create_record(300, "8301", true)).await.unwrap();

        assert_eq!(store.load_all().await.unwrap().len(), 2);
        assert!(!store.is_approved(100, "7453").await.unwrap());
        assert!(store.is_approved(300, "8301").await.unwrap());
        assert_eq!(store.list_by_listing(300).await.unwrap().len(), 1);
    }
}
