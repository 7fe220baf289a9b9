//! Shared application state for CLI commands.

use std::path::PathBuf;

use appforge_infra::config::{default_data_dir, load_app_config};
use appforge_infra::settings::FileSettingsStore;
use appforge_types::config::AppConfig;

/// Everything a command handler needs: the data directory, the loaded
/// global config, and the settings store.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: AppConfig,
    pub settings: FileSettingsStore,
}

impl AppState {
    /// Initialize state from the default data directory.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = default_data_dir();
        let config = load_app_config(&data_dir).await;
        let settings = FileSettingsStore::new(&data_dir);

        Ok(Self {
            data_dir,
            config,
            settings,
        })
    }
}
