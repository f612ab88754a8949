use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bson::{oid::ObjectId, Document};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::repository::document_store::{DocumentStore, StoreStatus, STATUS_COLLECTION_LIMIT};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Process-local [`DocumentStore`] for tests and local runs without MongoDB.
/// Ids are ObjectId hex strings, like the Mongo store.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
    offline: Arc<AtomicBool>,
    reject_writes: Arc<AtomicBool>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a lost connection; every call fails as unavailable until reset.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Simulate the store refusing writes while staying reachable.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub async fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections.read().await.get(collection).cloned().unwrap_or_default()
    }

    pub async fn find_by_id(&self, collection: &str, id: &str) -> Option<Document> {
        let oid = ObjectId::parse_str(id).ok()?;
        self.collections
            .read()
            .await
            .get(collection)?
            .iter()
            .find(|doc| doc.get_object_id("_id").ok() == Some(oid))
            .cloned()
    }

    fn ensure_online(&self) -> RepositoryResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("in-memory store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    #[instrument(skip(self, document), fields(collection = %collection))]
    async fn insert(&self, collection: &str, mut document: Document) -> RepositoryResult<String> {
        self.ensure_online()?;
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::write("in-memory store rejected the write"));
        }
        let id = ObjectId::new();
        document.insert("_id", id);
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        debug!(id = %id, "Document stored in memory");
        Ok(id.to_hex())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.ensure_online()
    }

    async fn status(&self) -> RepositoryResult<StoreStatus> {
        self.ensure_online()?;
        let mut collections: Vec<String> = self.collections.read().await.keys().cloned().collect();
        collections.sort();
        collections.truncate(STATUS_COLLECTION_LIMIT);
        Ok(StoreStatus {
            database_name: "in-memory".to_string(),
            collections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[tokio::test]
    async fn test_identical_documents_get_distinct_ids() {
        let store = InMemoryDocumentStore::new();
        let first = store.insert("application", doc! { "email": "anna@example.com" }).await.unwrap();
        let second = store.insert("application", doc! { "email": "anna@example.com" }).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(store.documents("application").await.len(), 2);
        assert!(store.find_by_id("application", &second).await.is_some());
    }

    #[tokio::test]
    async fn test_offline_store_is_unavailable() {
        let store = InMemoryDocumentStore::new();
        store.set_offline(true);
        let err = store.insert("application", doc! {}).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
        assert!(store.ping().await.is_err());
        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_rejected_write_stores_nothing() {
        let store = InMemoryDocumentStore::new();
        store.set_reject_writes(true);
        let err = store.insert("application", doc! {}).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Write(_)));
        assert!(store.documents("application").await.is_empty());
    }
}
