//! # User model
//!
//! ## [`User`] (server only)
//!
//! The `users` row created or refreshed by an OAuth sign-in. `provider` /
//! `provider_id` identify the account at the provider; `id` is the stable identity
//! thoughts are attributed to.
//!
//! ## [`UserInfo`]
//!
//! The client-safe projection sent through server functions. The `Uuid` becomes a
//! `String` so it works in WASM. [`UserInfo::identity`] narrows it further to the
//! [`store::User`] the note adapter works with.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
    pub provider_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
            provider: self.provider.clone(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
}

impl UserInfo {
    /// Name shown in the header, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_default()
    }

    /// The identity thoughts are attributed to. Only the provider's display name is
    /// used for attribution, so a user without one is credited as anonymous.
    pub fn identity(&self) -> store::User {
        store::User::new(self.id.clone(), self.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: Option<&str>, email: Option<&str>) -> UserInfo {
        UserInfo {
            id: "7f1c".into(),
            email: email.map(str::to_string),
            name: name.map(str::to_string),
            avatar_url: None,
            provider: "google".into(),
        }
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(info(Some("Ana"), Some("ana@example.com")).display_name(), "Ana");
        assert_eq!(info(None, Some("ana@example.com")).display_name(), "ana@example.com");
        assert_eq!(info(None, None).display_name(), "");
    }

    #[test]
    fn test_identity_keeps_id_and_name_only() {
        let user = info(None, Some("ana@example.com")).identity();
        assert_eq!(user.id, "7f1c");
        assert_eq!(user.display_name, None);
        assert_eq!(user.author_name("Anonymous"), "Anonymous");
    }
}
