//! User-visible notices raised after each action.

use serde::{Deserialize, Serialize};

use crate::error::ThoughtError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient toast: a short title and a one-line description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(description: &str) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success".to_string(),
            description: description.to_string(),
        }
    }

    pub fn error(description: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            description: description.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl From<&ThoughtError> for Notice {
    fn from(err: &ThoughtError) -> Self {
        Notice::error(match err {
            ThoughtError::Fetch(_) => "Failed to fetch thoughts. Please try again.",
            ThoughtError::Create(_) => "Failed to add thought. Please try again.",
            ThoughtError::Delete(_) => "Failed to delete thought. Please try again.",
            ThoughtError::SignIn(_) => "Failed to sign in. Please try again.",
            ThoughtError::SignOut(_) => "Failed to sign out. Please try again.",
            ThoughtError::NotAuthenticated => "You must be signed in to add a thought.",
            ThoughtError::Forbidden(_) => "You can only delete your own thoughts.",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn test_error_messages() {
        let forbidden = Notice::from(&ThoughtError::Forbidden("abc".into()));
        assert!(forbidden.is_error());
        assert_eq!(forbidden.title, "Error");
        assert_eq!(forbidden.description, "You can only delete your own thoughts.");

        let fetch = Notice::from(&ThoughtError::Fetch(StoreError::Unavailable("down".into())));
        assert_eq!(fetch.description, "Failed to fetch thoughts. Please try again.");
    }
}
