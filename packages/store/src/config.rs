//! # Application configuration: `thoughts.toml`
//!
//! Read by the server at startup (path from `THOUGHTS_CONFIG`, default
//! [`ThoughtsConfig::filename`]) and handed to clients through the `/api/config`
//! server function.
//!
//! ## Structure
//!
//! ```toml
//! [store]
//! collection = "posts"        # document collection holding the thoughts
//!
//! [authors]
//! anonymous_name = "Anonymous"   # attribution for users without a display name
//!
//! [rules]
//! enforce_ownership = true    # server rejects deletes of other users' thoughts
//!
//! [notices]
//! duration_secs = 4           # how long a notice stays visible, 0 keeps it until dismissed
//! ```
//!
//! Every section and key is optional; a missing or empty file is equivalent to
//! [`ThoughtsConfig::default`].

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `thoughts.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThoughtsConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub authors: AuthorsConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub notices: NoticesConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_collection")]
    pub collection: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthorsConfig {
    #[serde(default = "default_anonymous_name")]
    pub anonymous_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_true")]
    pub enforce_ownership: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoticesConfig {
    #[serde(default = "default_notice_secs")]
    pub duration_secs: u32,
}

fn default_collection() -> String {
    "posts".to_string()
}

fn default_anonymous_name() -> String {
    "Anonymous".to_string()
}

fn default_true() -> bool {
    true
}

fn default_notice_secs() -> u32 {
    4
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
        }
    }
}

impl Default for AuthorsConfig {
    fn default() -> Self {
        Self {
            anonymous_name: default_anonymous_name(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enforce_ownership: default_true(),
        }
    }
}

impl Default for NoticesConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_notice_secs(),
        }
    }
}

impl ThoughtsConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "thoughts.toml"
    }

    /// Builder method to point at another collection.
    pub fn with_collection(mut self, collection: &str) -> Self {
        self.store.collection = collection.to_string();
        self
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ThoughtsConfig::from_toml("").unwrap();
        assert_eq!(config, ThoughtsConfig::default());
        assert_eq!(config.store.collection, "posts");
        assert_eq!(config.authors.anonymous_name, "Anonymous");
        assert!(config.rules.enforce_ownership);
        assert_eq!(config.notices.duration_secs, 4);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = ThoughtsConfig::from_toml(
            r#"
            [store]
            collection = "thoughts"

            [rules]
            enforce_ownership = false
            "#,
        )
        .unwrap();
        assert_eq!(config.store.collection, "thoughts");
        assert!(!config.rules.enforce_ownership);
        assert_eq!(config.authors.anonymous_name, "Anonymous");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = ThoughtsConfig::default().with_collection("archive");
        let text = config.to_toml().unwrap();
        assert_eq!(ThoughtsConfig::from_toml(&text).unwrap(), config);
    }
}
