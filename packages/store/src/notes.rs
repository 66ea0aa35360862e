//! # Note store adapter
//!
//! [`NoteStore`] translates note operations into [`DocumentStore`] calls and maps
//! the generic records back into [`Note`]s. It is the only code that knows the
//! record layout of the thoughts collection.
//!
//! | Method | Store calls | Errors |
//! |--------|-------------|--------|
//! | [`list_all`](NoteStore::list_all) | `list_all` | [`ThoughtError::Fetch`] |
//! | [`create`](NoteStore::create) | `insert`, skipped for blank drafts | [`ThoughtError::NotAuthenticated`], [`ThoughtError::Create`] |
//! | [`remove`](NoteStore::remove) | `delete_by_id` | [`ThoughtError::Delete`] |
//! | [`remove_owned`](NoteStore::remove_owned) | `get` then `delete_by_id` | [`ThoughtError::Forbidden`], [`ThoughtError::Delete`] |
//!
//! `remove` performs no ownership check. Callers that sit on a trust boundary use
//! `remove_owned` instead.

use crate::config::ThoughtsConfig;
use crate::document::DocumentStore;
use crate::error::ThoughtError;
use crate::models::{Note, NoteDraft, User};

/// Note operations on top of a document collection.
pub struct NoteStore<S: DocumentStore> {
    store: S,
    collection: String,
    anonymous_name: String,
}

impl<S: DocumentStore> NoteStore<S> {
    /// Adapter over the default `posts` collection.
    pub fn new(store: S) -> Self {
        Self::with_config(store, &ThoughtsConfig::default())
    }

    pub fn with_config(store: S, config: &ThoughtsConfig) -> Self {
        Self {
            store,
            collection: config.store.collection.clone(),
            anonymous_name: config.authors.anonymous_name.clone(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Fetch every note in the collection, in store order.
    pub async fn list_all(&self) -> Result<Vec<Note>, ThoughtError> {
        let docs = self
            .store
            .list_all(&self.collection)
            .await
            .map_err(ThoughtError::Fetch)?;

        Ok(docs
            .iter()
            .filter_map(|doc| {
                let note = Note::from_record(&doc.id, &doc.record);
                if note.is_none() {
                    tracing::warn!(id = %doc.id, "skipping malformed record in {}", self.collection);
                }
                note
            })
            .collect())
    }

    /// Create a note authored by `author`.
    ///
    /// Returns `Ok(None)` without touching the store when the draft is blank.
    pub async fn create(
        &self,
        draft: &NoteDraft,
        author: Option<&User>,
    ) -> Result<Option<Note>, ThoughtError> {
        let Some(author) = author else {
            return Err(ThoughtError::NotAuthenticated);
        };
        if !draft.is_submittable() {
            return Ok(None);
        }

        let mut note = Note {
            id: String::new(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            author_id: author.id.clone(),
            author_name: author.author_name(&self.anonymous_name).to_string(),
        };

        note.id = self
            .store
            .insert(&self.collection, note.to_record())
            .await
            .map_err(ThoughtError::Create)?;

        Ok(Some(note))
    }

    /// Delete a note by id. Unknown ids succeed.
    pub async fn remove(&self, id: &str) -> Result<(), ThoughtError> {
        self.store
            .delete_by_id(&self.collection, id)
            .await
            .map_err(ThoughtError::Delete)
    }

    /// Delete a note only if `user` authored it. Unknown ids succeed.
    pub async fn remove_owned(&self, id: &str, user: &User) -> Result<(), ThoughtError> {
        let existing = self
            .store
            .get(&self.collection, id)
            .await
            .map_err(ThoughtError::Delete)?;

        let Some(doc) = existing else {
            return Ok(());
        };
        let owner = doc
            .record
            .get(crate::models::AUTHOR_ID_KEY)
            .and_then(|v| v.as_str());
        if owner != Some(user.id.as_str()) {
            return Err(ThoughtError::Forbidden(id.to_string()));
        }

        self.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Record;
    use crate::error::StoreError;
    use crate::memory::MemoryDocumentStore;

    fn ana() -> User {
        User::new("user42", Some("Ana"))
    }

    #[tokio::test]
    async fn test_create_then_list_contains_note_once() {
        let notes = NoteStore::new(MemoryDocumentStore::new());

        let created = notes
            .create(&NoteDraft::new("Groceries", "Buy milk"), Some(&ana()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.author_id, "user42");
        assert_eq!(created.author_name, "Ana");

        let listed = notes.list_all().await.unwrap();
        assert_eq!(listed.iter().filter(|n| n.id == created.id).count(), 1);
        assert_eq!(listed[0], created);
    }

    #[tokio::test]
    async fn test_blank_draft_is_not_submitted() {
        let store = MemoryDocumentStore::new();
        let notes = NoteStore::new(store.clone());

        for draft in [
            NoteDraft::new("", "body"),
            NoteDraft::new("title", "   "),
            NoteDraft::new(" \t", "\n"),
        ] {
            assert_eq!(notes.create(&draft, Some(&ana())).await, Ok(None));
        }
        assert_eq!(store.len("posts"), 0);
    }

    #[tokio::test]
    async fn test_create_without_user_is_not_authenticated() {
        let store = MemoryDocumentStore::new();
        let notes = NoteStore::new(store.clone());

        let result = notes.create(&NoteDraft::new("a", "b"), None).await;
        assert_eq!(result, Err(ThoughtError::NotAuthenticated));
        assert_eq!(store.len("posts"), 0);
    }

    #[tokio::test]
    async fn test_missing_display_name_is_anonymous() {
        let notes = NoteStore::new(MemoryDocumentStore::new());
        let note = notes
            .create(&NoteDraft::new("a", "b"), Some(&User::new("u1", None)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(note.author_name, "Anonymous");
    }

    #[tokio::test]
    async fn test_configured_collection_and_anonymous_name() {
        let store = MemoryDocumentStore::new();
        let mut config = ThoughtsConfig::default().with_collection("thoughts");
        config.authors.anonymous_name = "Someone".into();
        let notes = NoteStore::with_config(store.clone(), &config);

        let note = notes
            .create(&NoteDraft::new("a", "b"), Some(&User::new("u1", None)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(note.author_name, "Someone");
        assert_eq!(store.len("thoughts"), 1);
        assert_eq!(store.len("posts"), 0);
    }

    #[tokio::test]
    async fn test_remove_then_list_excludes_id() {
        let notes = NoteStore::new(MemoryDocumentStore::new());
        let first = notes
            .create(&NoteDraft::new("one", "1"), Some(&ana()))
            .await
            .unwrap()
            .unwrap();
        notes
            .create(&NoteDraft::new("two", "2"), Some(&ana()))
            .await
            .unwrap();

        notes.remove(&first.id).await.unwrap();

        let listed = notes.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|n| n.id != first.id));
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_noop() {
        let notes = NoteStore::new(MemoryDocumentStore::new());
        assert_eq!(notes.remove("does-not-exist").await, Ok(()));
    }

    #[tokio::test]
    async fn test_remove_owned_rejects_other_author() {
        let notes = NoteStore::new(MemoryDocumentStore::new());
        let note = notes
            .create(&NoteDraft::new("mine", "x"), Some(&ana()))
            .await
            .unwrap()
            .unwrap();

        let bob = User::new("bob", Some("Bob"));
        assert_eq!(
            notes.remove_owned(&note.id, &bob).await,
            Err(ThoughtError::Forbidden(note.id.clone()))
        );
        assert_eq!(notes.list_all().await.unwrap().len(), 1);

        notes.remove_owned(&note.id, &ana()).await.unwrap();
        assert!(notes.list_all().await.unwrap().is_empty());

        // Already gone
        assert_eq!(notes.remove_owned(&note.id, &bob).await, Ok(()));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_fetch_error() {
        let store = MemoryDocumentStore::new();
        store.set_unavailable(true);
        let notes = NoteStore::new(store);

        assert!(matches!(
            notes.list_all().await,
            Err(ThoughtError::Fetch(StoreError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_malformed_records_are_skipped() {
        let store = MemoryDocumentStore::new();
        let mut broken = Record::new();
        broken.insert("title".into(), "no author".into());
        store.insert("posts", broken).await.unwrap();

        let notes = NoteStore::new(store);
        notes
            .create(&NoteDraft::new("ok", "fine"), Some(&ana()))
            .await
            .unwrap();

        let listed = notes.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "ok");
    }
}
