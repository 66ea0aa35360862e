//! Client-side backends that reach the server through `api` server functions.
//!
//! - [`RemoteDocumentStore`]: [`store::DocumentStore`] over the `/api/documents/*` endpoints.
//! - [`RemoteIdentity`]: [`store::IdentityProvider`] over the `/api/auth/*` endpoints.
//!   Sign-in leaves the page for the provider, so it always answers with
//!   [`SignInOutcome::Redirect`].
//!
//! [`make_keeper`] wires both into a [`ThoughtKeeper`].

use api::auth::OAuthProvider;
use store::{
    DocumentStore, IdentityProvider, NoteStore, Record, SignInOutcome, StoreError,
    StoredDocument, ThoughtKeeper, ThoughtsConfig, User,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct RemoteDocumentStore;

fn unavailable(e: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

impl DocumentStore for RemoteDocumentStore {
    async fn insert(&self, collection: &str, record: Record) -> Result<String, StoreError> {
        api::insert_document(collection.to_string(), record)
            .await
            .map_err(unavailable)
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        api::list_documents(collection.to_string())
            .await
            .map_err(unavailable)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        Ok(self
            .list_all(collection)
            .await?
            .into_iter()
            .find(|doc| doc.id == id))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        api::delete_document(collection.to_string(), id.to_string())
            .await
            .map_err(unavailable)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RemoteIdentity {
    provider: OAuthProvider,
}

impl RemoteIdentity {
    pub fn new(provider: OAuthProvider) -> Self {
        Self { provider }
    }
}

impl Default for RemoteIdentity {
    fn default() -> Self {
        Self::new(OAuthProvider::Google)
    }
}

impl IdentityProvider for RemoteIdentity {
    async fn sign_in(&self) -> Result<SignInOutcome, String> {
        let url = api::get_login_url(self.provider.to_string())
            .await
            .map_err(|e| e.to_string())?;
        Ok(SignInOutcome::Redirect { url })
    }

    async fn sign_out(&self) -> Result<(), String> {
        api::logout().await.map_err(|e| e.to_string())
    }

    async fn current_user(&self) -> Result<Option<User>, String> {
        api::get_current_user()
            .await
            .map(|info| info.map(|u| u.identity()))
            .map_err(|e| e.to_string())
    }
}

/// Keeper over the remote store, signing in with `provider`.
pub fn make_keeper(
    config: &ThoughtsConfig,
    provider: OAuthProvider,
) -> ThoughtKeeper<RemoteDocumentStore, RemoteIdentity> {
    ThoughtKeeper::new(
        NoteStore::with_config(RemoteDocumentStore, config),
        RemoteIdentity::new(provider),
    )
}
