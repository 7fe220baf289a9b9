//! Global application configuration.
//!
//! Loaded from `config.toml` in the data directory; every field has a
//! default so a missing or partial file still yields a working config.

use serde::{Deserialize, Serialize};

/// Application-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// URL of the generation endpoint the chat session posts prompts to.
    #[serde(default = "default_generate_url")]
    pub generate_url: String,

    /// Seconds to wait between artifact polls while a remote build runs.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Maximum number of artifact polls before the build times out.
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generate_url: default_generate_url(),
            poll_interval_secs: default_poll_interval_secs(),
            max_polls: default_max_polls(),
        }
    }
}

fn default_generate_url() -> String {
    "https://api.appforge.dev/v1/generate".to_string()
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_max_polls() -> u32 {
    90
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.max_polls, 90);
        assert!(config.generate_url.starts_with("https://"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("poll_interval_secs = 2").unwrap();
        assert_eq!(config.poll_interval_secs, 2);
        assert_eq!(config.max_polls, 90);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_polls, AppConfig::default().max_polls);
    }
}
