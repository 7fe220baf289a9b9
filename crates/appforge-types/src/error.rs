//! Cross-cutting error types.

use thiserror::Error;

/// Errors from the persisted settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(String),

    #[error("settings parse error: {0}")]
    Parse(String),
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_display() {
        let err = SettingsError::Parse("expected a string for key 'owner'".to_string());
        assert_eq!(
            err.to_string(),
            "settings parse error: expected a string for key 'owner'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SettingsError = io.into();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
