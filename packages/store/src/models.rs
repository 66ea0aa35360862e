//! # Domain models for thoughts and their authors
//!
//! These types are `Serialize + Deserialize` so they can cross the server/client
//! boundary via Dioxus server functions.
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Note`] | A thought as the application sees it: store-assigned `id`, `title`, `content`, and the author attribution. |
//! | [`User`] | The signed-in identity: a stable `id` and an optional display name. |
//! | [`NoteDraft`] | The raw form input for a new thought, before validation. |
//!
//! ## Record layout
//!
//! Notes are persisted as schemaless records in the `posts` collection with the keys
//! `title`, `content`, `userId` and `username`. [`Note::to_record`] and
//! [`Note::from_record`] translate between the two shapes; the `id` lives next to
//! the record, never inside it.

use serde::{Deserialize, Serialize};

use crate::document::Record;

pub const TITLE_KEY: &str = "title";
pub const CONTENT_KEY: &str = "content";
pub const AUTHOR_ID_KEY: &str = "userId";
pub const AUTHOR_NAME_KEY: &str = "username";

/// A user-authored thought with author attribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Assigned by the document store at insert time, immutable afterwards.
    pub id: String,
    pub title: String,
    pub content: String,
    /// Id of the user who created the note.
    pub author_id: String,
    pub author_name: String,
}

impl Note {
    /// Build the stored record for this note (everything except the id).
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(TITLE_KEY.into(), self.title.clone().into());
        record.insert(CONTENT_KEY.into(), self.content.clone().into());
        record.insert(AUTHOR_ID_KEY.into(), self.author_id.clone().into());
        record.insert(AUTHOR_NAME_KEY.into(), self.author_name.clone().into());
        record
    }

    /// Rebuild a note from its id and stored record.
    ///
    /// Returns `None` only when the author id is missing or not a string; a missing
    /// title, content or author name reads as empty.
    pub fn from_record(id: &str, record: &Record) -> Option<Self> {
        let field = |key: &str| record.get(key)?.as_str().map(str::to_string);
        Some(Self {
            id: id.to_string(),
            title: field(TITLE_KEY).unwrap_or_default(),
            content: field(CONTENT_KEY).unwrap_or_default(),
            author_id: field(AUTHOR_ID_KEY)?,
            author_name: field(AUTHOR_NAME_KEY).unwrap_or_default(),
        })
    }

    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author_id == user.id
    }
}

/// Identity returned by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, display_name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.map(str::to_string),
        }
    }

    /// Display name to attribute notes to, falling back to `anonymous`.
    pub fn author_name<'a>(&'a self, anonymous: &'a str) -> &'a str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => anonymous,
        }
    }
}

/// Unvalidated input from the creation form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Both fields must be non-empty after trimming whitespace.
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}
