use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sha1::{Digest, Sha1};

use crate::document::{DocumentStore, Record, StoredDocument};
use crate::error::StoreError;

/// Length of generated ids, the same as hosted document ids.
const ID_LEN: usize = 20;

/// In-memory DocumentStore for testing and offline fallback.
///
/// Collections keep insertion order. Clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<Mutex<HashMap<String, Vec<StoredDocument>>>>,
    next_seq: Arc<Mutex<u64>>,
    failing: Arc<Mutex<bool>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with [`StoreError::Unavailable`] (or stop doing so).
    pub fn set_unavailable(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Number of records currently held in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if *self.failing.lock().unwrap() {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(())
    }

    /// Derive a fresh id from the collection name and a sequence number.
    fn generate_id(&self, collection: &str) -> String {
        let mut seq = self.next_seq.lock().unwrap();
        *seq += 1;
        let mut hasher = Sha1::new();
        hasher.update(collection.as_bytes());
        hasher.update(seq.to_be_bytes());
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        hex[..ID_LEN].to_string()
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, record: Record) -> Result<String, StoreError> {
        self.check_available()?;
        let id = self.generate_id(collection);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                record,
            });
        Ok(id)
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        self.check_available()?;
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        self.check_available()?;
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.check_available()?;
        if let Some(docs) = self.collections.lock().unwrap().get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> Record {
        let mut r = Record::new();
        r.insert("title".into(), title.into());
        r
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = MemoryDocumentStore::new();

        // Initially empty
        assert!(store.list_all("posts").await.unwrap().is_empty());

        let first = store.insert("posts", record("one")).await.unwrap();
        let second = store.insert("posts", record("two")).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(first.len(), ID_LEN);

        let docs = store.list_all("posts").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, first);
        assert_eq!(docs[1].record["title"], "two");
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = MemoryDocumentStore::new();
        store.insert("posts", record("a")).await.unwrap();
        store.insert("drafts", record("b")).await.unwrap();

        assert_eq!(store.len("posts"), 1);
        assert_eq!(store.len("drafts"), 1);
        assert_eq!(store.len("nope"), 0);
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let store = MemoryDocumentStore::new();
        let id = store.insert("posts", record("a")).await.unwrap();

        assert!(store.get("posts", &id).await.unwrap().is_some());
        store.delete_by_id("posts", &id).await.unwrap();
        assert!(store.get("posts", &id).await.unwrap().is_none());

        // Unknown ids are a no-op
        store.delete_by_id("posts", "missing").await.unwrap();
        store.delete_by_id("other", "missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryDocumentStore::new();
        store.set_unavailable(true);

        assert!(matches!(
            store.list_all("posts").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.insert("posts", record("a")).await.is_err());

        store.set_unavailable(false);
        assert!(store.list_all("posts").await.is_ok());
    }
}
