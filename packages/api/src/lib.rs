//! # API crate: fullstack server functions for Thoughts
//!
//! Defines every Dioxus server function the web frontend calls, along with the
//! server-side modules behind them.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | partly `server` | OAuth sign-in (Google, GitHub) with PKCE, session keys |
//! | [`db`] | `server` | PostgreSQL pool, migrations, and the `documents`-table [`store::DocumentStore`] |
//! | [`models`] | none | `User` row and its client-safe projection `UserInfo` |
//! | [`rules`] | none | Which collection, author and session a document call may touch |
//! | [`settings`] | `server` | `thoughts.toml` loading |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is compiled twice: once with full server
//! logic (behind `#[cfg(feature = "server")]`) and once as a thin client stub that
//! forwards the call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `get_login_url`, `logout`
//! - **Documents**: `list_documents`, `insert_document`, `delete_document`
//! - **Configuration**: `get_config`

use dioxus::prelude::*;

pub mod auth;
pub mod db;
pub mod models;
pub mod rules;
#[cfg(feature = "server")]
pub mod settings;

pub use models::UserInfo;
pub use store::{Record, StoredDocument, ThoughtsConfig};

/// Load the signed-in user for this session, if any.
#[cfg(feature = "server")]
async fn session_user(
    session: &tower_sessions::Session,
) -> Result<Option<models::User>, ServerFnError> {
    use crate::db::get_pool;

    let user_id: Option<String> = session
        .get(auth::SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let user_uuid =
        uuid::Uuid::parse_str(&user_id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(feature = "server")]
async fn document_store() -> Result<db::PgDocumentStore, ServerFnError> {
    let pool = db::get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(db::PgDocumentStore::new(pool.clone()))
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(session_user(&session).await?.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Get the OAuth login URL for a provider (`google` or `github`).
#[cfg(feature = "server")]
#[get("/api/auth/login/:provider")]
pub async fn get_login_url(provider: String) -> Result<String, ServerFnError> {
    let provider: auth::OAuthProvider = provider.parse().map_err(|e: String| ServerFnError::new(e))?;
    let flow = auth::OAuthFlow::new(provider).map_err(|e| ServerFnError::new(e))?;
    flow.authorize_url()
        .await
        .map_err(|e| ServerFnError::new(e))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/login/:provider")]
pub async fn get_login_url(provider: String) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// The application config the client needs (collection, author fallback, notices).
#[cfg(feature = "server")]
#[get("/api/config")]
pub async fn get_config() -> Result<ThoughtsConfig, ServerFnError> {
    Ok(settings::get_config().clone())
}

#[cfg(not(feature = "server"))]
#[get("/api/config")]
pub async fn get_config() -> Result<ThoughtsConfig, ServerFnError> {
    Ok(ThoughtsConfig::default())
}

/// Every document in a collection. Reading is public.
#[cfg(feature = "server")]
#[get("/api/documents/:collection")]
pub async fn list_documents(collection: String) -> Result<Vec<StoredDocument>, ServerFnError> {
    use store::DocumentStore;

    rules::check_collection(settings::get_config(), &collection)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    document_store()
        .await?
        .list_all(&collection)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/documents/:collection")]
pub async fn list_documents(collection: String) -> Result<Vec<StoredDocument>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Insert a record and return its generated id.
#[cfg(feature = "server")]
#[post("/api/documents/insert", session: tower_sessions::Session)]
pub async fn insert_document(collection: String, record: Record) -> Result<String, ServerFnError> {
    use store::DocumentStore;

    let config = settings::get_config();
    let user = session_user(&session).await?.map(|u| u.to_info().identity());

    rules::check_collection(config, &collection)
        .and_then(|_| rules::check_insert(config, user.as_ref(), &record))
        .map_err(|e| {
            tracing::warn!("Rejected insert into {collection}: {e}");
            ServerFnError::new(e.to_string())
        })?;

    document_store()
        .await?
        .insert(&collection, record)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/documents/insert")]
pub async fn insert_document(collection: String, record: Record) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a record by id. Unknown ids succeed.
#[cfg(feature = "server")]
#[post("/api/documents/delete", session: tower_sessions::Session)]
pub async fn delete_document(collection: String, id: String) -> Result<(), ServerFnError> {
    use store::{DocumentStore, NoteStore};

    let config = settings::get_config();
    let user = session_user(&session).await?.map(|u| u.to_info().identity());

    let user = rules::check_collection(config, &collection)
        .and_then(|_| rules::require_user(user.as_ref()))
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let store = document_store().await?;
    if config.rules.enforce_ownership {
        NoteStore::with_config(store, config)
            .remove_owned(&id, user)
            .await
            .map_err(|e| {
                tracing::warn!("Rejected delete of {id}: {e}");
                ServerFnError::new(e.to_string())
            })
    } else {
        store
            .delete_by_id(&collection, &id)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))
    }
}

#[cfg(not(feature = "server"))]
#[post("/api/documents/delete")]
pub async fn delete_document(collection: String, id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
