//! Loads `thoughts.toml` once per process.

use std::sync::OnceLock;

use store::ThoughtsConfig;

static CONFIG: OnceLock<ThoughtsConfig> = OnceLock::new();

/// The application config, read from `THOUGHTS_CONFIG` (default `thoughts.toml`).
///
/// A missing file means defaults; an unreadable or invalid one is logged and
/// also falls back to defaults.
pub fn get_config() -> &'static ThoughtsConfig {
    CONFIG.get_or_init(|| {
        dotenvy::dotenv().ok();
        let path = std::env::var("THOUGHTS_CONFIG")
            .unwrap_or_else(|_| ThoughtsConfig::filename().to_string());
        load(&path)
    })
}

fn load(path: &str) -> ThoughtsConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("{path} not found, using default config");
            return ThoughtsConfig::default();
        }
        Err(e) => {
            tracing::warn!("Failed to read {path}: {e}");
            return ThoughtsConfig::default();
        }
    };

    ThoughtsConfig::from_toml(&text).unwrap_or_else(|e| {
        tracing::warn!("Invalid {path}: {e}");
        ThoughtsConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_default() {
        assert_eq!(load("/nonexistent/thoughts.toml"), ThoughtsConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("thoughts_test_{}.toml", std::process::id()));
        std::fs::write(&path, "[store]\ncollection = \"journal\"\n").unwrap();

        let config = load(path.to_str().unwrap());
        assert_eq!(config.store.collection, "journal");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let path = std::env::temp_dir().join(format!("thoughts_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "[store\ncollection = ").unwrap();

        assert_eq!(load(path.to_str().unwrap()), ThoughtsConfig::default());

        let _ = std::fs::remove_file(&path);
    }
}
