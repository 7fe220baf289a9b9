//! BuildHost trait definition.
//!
//! The seam between the build state machine and the remote
//! source-control-plus-CI platform. Uses native async fn in traits (RPITIT,
//! Rust 2024 edition); the production implementation (`GithubBuildHost`)
//! lives in appforge-infra, and tests drive the state machine through a
//! scripted in-memory host.

use appforge_types::build::{BuildConfig, BuildError, NamedArtifact};

/// Operations the build workflow needs from the remote host.
///
/// All methods take the full [`BuildConfig`] so implementations stay
/// stateless with respect to credentials.
pub trait BuildHost: Send + Sync {
    /// Single read request validating repository reachability and
    /// credential validity. Distinguishes unauthenticated (401) from
    /// forbidden/not-found (403/404) in the returned error.
    fn probe(
        &self,
        config: &BuildConfig,
    ) -> impl std::future::Future<Output = Result<(), BuildError>> + Send;

    /// Current revision marker of a remote file, or `None` when the file
    /// does not exist yet (which makes the next write a create).
    fn file_revision(
        &self,
        config: &BuildConfig,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, BuildError>> + Send;

    /// Write one file. `revision` must be the marker returned by
    /// [`BuildHost::file_revision`] when the file already exists.
    fn write_file(
        &self,
        config: &BuildConfig,
        path: &str,
        content: &str,
        revision: Option<&str>,
    ) -> impl std::future::Future<Output = Result<(), BuildError>> + Send;

    /// List the repository's build artifacts, in the host's order.
    fn artifacts(
        &self,
        config: &BuildConfig,
    ) -> impl std::future::Future<Output = Result<Vec<NamedArtifact>, BuildError>> + Send;

    /// Fetch an artifact archive's raw bytes. The URL must be one returned
    /// inside a [`NamedArtifact`] and requires the same credential.
    fn fetch_artifact(
        &self,
        config: &BuildConfig,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, BuildError>> + Send;
}
