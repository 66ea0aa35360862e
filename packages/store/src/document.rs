//! # Document store: the generic record collection behind the notes
//!
//! [`DocumentStore`] is the narrow capability interface the note adapter consumes.
//! A store holds named collections of schemaless [`Record`]s; each record gets an
//! opaque id at insert time. Implementations:
//!
//! | Type | Crate | Backing |
//! |------|-------|---------|
//! | [`crate::MemoryDocumentStore`] | `store` | process memory (tests, offline fallback) |
//! | `PgDocumentStore` | `api` | the `documents` table in Postgres |
//! | `RemoteDocumentStore` | `ui` | server functions exposed by `api` |
//!
//! No ordering is promised by [`list_all`](DocumentStore::list_all).

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A schemaless record: a JSON object.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A record together with the id the store assigned to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub record: Record,
}

/// Async interface over a hosted document collection.
pub trait DocumentStore {
    /// Append a record and return its newly generated id.
    fn insert(
        &self,
        collection: &str,
        record: Record,
    ) -> impl std::future::Future<Output = Result<String, StoreError>>;

    /// Every record in the collection.
    fn list_all(
        &self,
        collection: &str,
    ) -> impl std::future::Future<Output = Result<Vec<StoredDocument>, StoreError>>;

    /// A single record, or `None` if no record has this id.
    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<StoredDocument>, StoreError>>;

    /// Delete a record. Deleting an unknown id succeeds.
    fn delete_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
}
