//! Settings store trait and display helpers.
//!
//! Build settings (owner, repository, access token) persist under fixed
//! keys in local storage and are cleared on sign-out. Implementations live
//! in appforge-infra. Uses RPITIT (native async fn in traits, Rust 2024
//! edition).

use appforge_types::build::BuildConfig;
use appforge_types::error::SettingsError;

/// Persistent storage for the build settings.
pub trait SettingsStore: Send + Sync {
    /// Load the stored settings. Returns `None` when nothing has been
    /// saved yet.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<BuildConfig>, SettingsError>> + Send;

    /// Persist the settings, replacing any previous values.
    fn save(
        &self,
        config: &BuildConfig,
    ) -> impl std::future::Future<Output = Result<(), SettingsError>> + Send;

    /// Remove the stored settings (the sign-out path). A no-op when
    /// nothing is stored.
    fn clear(&self) -> impl std::future::Future<Output = Result<(), SettingsError>> + Send;
}

/// Render a token for display: first and last four characters with the
/// middle elided, or fully masked when too short for that to hide anything.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}****{tail}")
}
