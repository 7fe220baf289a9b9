//! Remote build types: configuration, artifact references, state, errors.
//!
//! `BuildConfig` identifies the remote host account/repository and carries
//! the access credential. The credential is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remote host account, repository, and access credential.
///
/// Supplied by the user and treated as opaque. All fields are trimmed at
/// construction (pasted tokens routinely carry stray whitespace).
#[derive(Clone)]
pub struct BuildConfig {
    pub owner: String,
    pub repo: String,
    pub token: SecretString,
}

impl BuildConfig {
    /// Create a config, trimming every field.
    pub fn new(owner: &str, repo: &str, token: &str) -> Self {
        Self {
            owner: owner.trim().to_string(),
            repo: repo.trim().to_string(),
            token: SecretString::from(token.trim().to_string()),
        }
    }

    /// Whether every field is non-empty. A build must not touch the
    /// network when this is false.
    pub fn is_complete(&self) -> bool {
        !self.owner.is_empty() && !self.repo.is_empty() && !self.token.expose_secret().is_empty()
    }

    /// Suggested local filename for a downloaded artifact archive.
    pub fn archive_name(&self) -> String {
        format!("{}-bundle.zip", self.repo)
    }
}

// Manual Debug keeps the token out of logs and panic messages.
impl fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildConfig")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// References to a finished build artifact.
///
/// `download_url` requires the build credential to fetch; `human_url` is
/// directly viewable (e.g. for rendering as a scannable code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArtifactRef {
    pub download_url: String,
    pub human_url: String,
}

/// An artifact as listed by the remote host, before name filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedArtifact {
    pub name: String,
    pub artifact: BuildArtifactRef,
}

/// Lifecycle state of a remote build.
///
/// `Idle` at session start; `Pushing` on a user-triggered request;
/// `Building` once the push succeeds; `Done` when polling finds a matching
/// artifact; `Failed` with a human-readable reason on any error. A new
/// build request from `Done`/`Failed` restarts at `Pushing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Pushing,
    Building,
    Done(BuildArtifactRef),
    Failed(String),
}

impl BuildState {
    /// Whether a build sequence is currently running. A new request must
    /// be rejected while this is true.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, BuildState::Pushing | BuildState::Building)
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildState::Idle => write!(f, "idle"),
            BuildState::Pushing => write!(f, "pushing"),
            BuildState::Building => write!(f, "building"),
            BuildState::Done(_) => write!(f, "done"),
            BuildState::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Errors from the remote build workflow.
///
/// Only the artifact-poll loop retries anything; every other failure
/// surfaces immediately with a human-readable message.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("build settings are incomplete; set owner, repository, and access token first")]
    ConfigMissing,

    #[error("remote host rejected access (HTTP {status}): {message}")]
    AuthOrAccess { status: u16, message: String },

    #[error("failed to push '{path}': {detail}")]
    Push { path: String, detail: String },

    #[error("artifact poll failed: {detail}")]
    Poll { detail: String },

    #[error("artifact download failed: {detail}")]
    Download { detail: String },

    #[error("connection to remote host failed: {detail}")]
    Connection { detail: String },

    #[error("no build artifact appeared after {attempts} polls")]
    Timeout { attempts: u32 },

    #[error("a build is already in progress")]
    InFlight,

    #[error("build cancelled")]
    Cancelled,
}
