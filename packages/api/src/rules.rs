//! # Server-side access rules for the document endpoints
//!
//! The browser talks to the document store through generic server functions, so the
//! server decides what each session may do:
//!
//! - Only the configured thoughts collection is reachable.
//! - Reading is public.
//! - Writing requires a signed-in session.
//! - With `rules.enforce_ownership` (the default) an inserted record must carry the
//!   session user's id as its author, and deletes go through
//!   [`store::NoteStore::remove_owned`].

use store::models::AUTHOR_ID_KEY;
use store::{Record, StoreError, ThoughtsConfig, User};

pub fn check_collection(config: &ThoughtsConfig, collection: &str) -> Result<(), StoreError> {
    if collection != config.store.collection {
        return Err(StoreError::Denied(format!("unknown collection {collection}")));
    }
    Ok(())
}

/// The session user, or a denial for anonymous writes.
pub fn require_user(user: Option<&User>) -> Result<&User, StoreError> {
    user.ok_or_else(|| StoreError::Denied("sign in required".into()))
}

pub fn check_insert(
    config: &ThoughtsConfig,
    user: Option<&User>,
    record: &Record,
) -> Result<(), StoreError> {
    let user = require_user(user)?;
    if !config.rules.enforce_ownership {
        return Ok(());
    }
    match record.get(AUTHOR_ID_KEY).and_then(|v| v.as_str()) {
        Some(author) if author == user.id => Ok(()),
        _ => Err(StoreError::Denied(format!(
            "{AUTHOR_ID_KEY} must be the signed-in user"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::Note;

    fn record_by(author: &str) -> Record {
        Note {
            id: String::new(),
            title: "t".into(),
            content: "c".into(),
            author_id: author.into(),
            author_name: author.into(),
        }
        .to_record()
    }

    #[test]
    fn test_only_configured_collection() {
        let config = ThoughtsConfig::default();
        assert!(check_collection(&config, "posts").is_ok());
        assert!(matches!(
            check_collection(&config, "users"),
            Err(StoreError::Denied(_))
        ));
    }

    #[test]
    fn test_insert_requires_session() {
        let config = ThoughtsConfig::default();
        assert!(check_insert(&config, None, &record_by("a")).is_err());
    }

    #[test]
    fn test_insert_must_be_attributed_to_session_user() {
        let config = ThoughtsConfig::default();
        let ana = User::new("a", Some("Ana"));

        assert!(check_insert(&config, Some(&ana), &record_by("a")).is_ok());
        assert!(check_insert(&config, Some(&ana), &record_by("b")).is_err());
        assert!(check_insert(&config, Some(&ana), &Record::new()).is_err());
    }

    #[test]
    fn test_ownership_can_be_disabled() {
        let mut config = ThoughtsConfig::default();
        config.rules.enforce_ownership = false;
        let ana = User::new("a", None);

        assert!(check_insert(&config, Some(&ana), &record_by("b")).is_ok());
        // Still no anonymous writes
        assert!(check_insert(&config, None, &record_by("b")).is_err());
    }

    #[test]
    fn test_anonymous_delete_is_denied() {
        assert!(matches!(require_user(None), Err(StoreError::Denied(_))));

        let ana = User::new("a", Some("Ana"));
        assert_eq!(require_user(Some(&ana)), Ok(&ana));
    }
}
