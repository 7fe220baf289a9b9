//! File-backed settings store.
//!
//! Build settings live as a small TOML document (`build.toml`) in the data
//! directory. The access token is also resolvable from an environment
//! variable, which overrides the stored value at load time -- the env var
//! is the recommended home for the token on shared machines.

use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use appforge_core::settings::SettingsStore;
use appforge_types::build::BuildConfig;
use appforge_types::error::SettingsError;

/// Environment variable that overrides the stored access token.
pub const TOKEN_ENV: &str = "APPFORGE_GITHUB_TOKEN";

/// On-disk settings document. Fixed keys: `owner`, `repo`, `token`.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSettings {
    owner: String,
    repo: String,
    #[serde(default)]
    token: String,
}

/// Settings store over one TOML file.
pub struct FileSettingsStore {
    path: PathBuf,
    token_env: String,
}

impl FileSettingsStore {
    /// Store settings under `{data_dir}/build.toml`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("build.toml"),
            token_env: TOKEN_ENV.to_string(),
        }
    }

    /// Override the token env var name (test seam).
    pub fn with_token_env(mut self, token_env: impl Into<String>) -> Self {
        self.token_env = token_env.into();
        self
    }

    /// The settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resolve_token(&self, stored: String) -> String {
        match std::env::var(&self.token_env) {
            Ok(from_env) if !from_env.trim().is_empty() => {
                debug!(var = %self.token_env, "using access token from environment");
                from_env
            }
            _ => stored,
        }
    }
}

impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<Option<BuildConfig>, SettingsError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let stored: StoredSettings =
            toml::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))?;
        let token = self.resolve_token(stored.token);
        Ok(Some(BuildConfig::new(&stored.owner, &stored.repo, &token)))
    }

    async fn save(&self, config: &BuildConfig) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let stored = StoredSettings {
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            token: config.token.expose_secret().to_string(),
        };
        let content =
            toml::to_string_pretty(&stored).map_err(|e| SettingsError::Parse(e.to_string()))?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SettingsError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
