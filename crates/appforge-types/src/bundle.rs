//! Source bundle: the full set of generated files for one project.
//!
//! A bundle maps relative file paths to text content. It is owned by a
//! single session and mutated per-key as generation replies come in, so
//! there is no interior mutability here -- just a validated map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default entry document key.
pub const ENTRY_FILE: &str = "index.html";

/// Default stylesheet key.
pub const STYLE_FILE: &str = "styles.css";

/// Default script key.
pub const SCRIPT_FILE: &str = "main.js";

/// Errors from bundle mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BundleError {
    #[error("invalid bundle path: '{0}'")]
    InvalidPath(String),
}

/// In-memory mapping of relative file path to file content.
///
/// Keys are unique, non-empty, forward-slash separated relative paths.
/// Iteration order is deterministic (sorted by path) -- callers that push
/// the bundle to a remote host rely on a stable write order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceBundle {
    files: BTreeMap<String, String>,
}

impl SourceBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundle a fresh session starts from: a minimal welcome document
    /// plus empty stylesheet and script files, so the preview surface has
    /// something to render before the first generation step.
    pub fn starter() -> Self {
        let mut bundle = Self::new();
        // Paths are the fixed defaults; inserts cannot fail.
        let _ = bundle.insert(ENTRY_FILE, STARTER_DOCUMENT);
        let _ = bundle.insert(STYLE_FILE, "");
        let _ = bundle.insert(SCRIPT_FILE, "");
        bundle
    }

    /// Insert or replace a file. Rejects paths that are empty, absolute,
    /// contain backslashes, or traverse upward -- keys are later
    /// interpolated into remote-host URLs.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), BundleError> {
        let path = path.into();
        validate_path(&path)?;
        self.files.insert(path, content.into());
        Ok(())
    }

    /// Remove a file, returning its content if it was present.
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.files.remove(path)
    }

    /// Get a file's content.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Whether a file is present.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Number of files in the bundle.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the bundle holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over `(path, content)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
    }

    /// Iterate over paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// Validate a bundle path: non-empty, relative, forward-slash separated,
/// and free of empty or `..` segments.
fn validate_path(path: &str) -> Result<(), BundleError> {
    if path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.split('/').any(|segment| segment.is_empty() || segment == "..")
    {
        return Err(BundleError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Entry document seeded into every fresh session.
const STARTER_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>AppForge Preview</title>
  <style>
    body { background: #0b1120; color: #7dd3fc; display: flex; align-items: center; justify-content: center; height: 100vh; margin: 0; font-family: sans-serif; text-align: center; }
    h1 { text-transform: uppercase; letter-spacing: 0.2em; font-size: 20px; }
    p { opacity: 0.6; font-size: 10px; text-transform: uppercase; letter-spacing: 0.1em; }
  </style>
</head>
<body>
  <div>
    <h1>Workspace Ready</h1>
    <p>Describe the app you want to build.</p>
  </div>
</body>
</html>"#;
