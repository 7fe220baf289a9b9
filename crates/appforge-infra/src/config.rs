//! Global configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.appforge/` in
//! production) and deserializes it into [`AppConfig`]. Falls back to the
//! defaults when the file is missing or malformed -- a broken config file
//! must never stop the app from starting.

use std::path::{Path, PathBuf};

use appforge_types::config::AppConfig;

/// Resolve the data directory: `~/.appforge`, or `./.appforge` when no
/// home directory can be determined.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".appforge"))
        .unwrap_or_else(|| PathBuf::from(".appforge"))
}

/// Load application configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`AppConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.max_polls, 90);
    }

    #[tokio::test]
    async fn test_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
generate_url = "https://example.test/generate"
poll_interval_secs = 5
max_polls = 12
"#,
        )
        .await
        .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.generate_url, "https://example.test/generate");
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.max_polls, 12);
    }

    #[tokio::test]
    async fn test_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "not { valid toml !!!")
            .await
            .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.max_polls, AppConfig::default().max_polls);
    }
}
